//! Score orchestration: extract → skills → similarity → skill match → field → report.
//!
//! `ScoreEngine` is immutable after construction and shared across requests as
//! `Arc<ScoreEngine>`. Randomness for video sampling is passed in per call.

use std::fmt;
use std::path::Path;

use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::extraction::{extract_text, ExtractError};
use crate::scoring::dictionary::SkillDictionary;
use crate::scoring::recommend::{classify_field, suggestions_for, InterviewVideo, VideoCatalog};
use crate::scoring::similarity::{score_similarity, Embedder};
use crate::scoring::skills::{SkillExtractor, SkillSet};

pub const SIMILARITY_WEIGHT: f64 = 0.6;
pub const SKILL_MATCH_WEIGHT: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    Resume,
    JobDescription,
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Document::Resume => write!(f, "resume"),
            Document::JobDescription => write!(f, "job description"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("Text extraction failed: {0} yielded no text")]
    EmptyText(Document),

    #[error("Text extraction failed for {document}: {source}")]
    Extraction {
        document: Document,
        #[source]
        source: ExtractError,
    },
}

/// Final assessment returned to the client.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    /// 0–100, one decimal.
    pub score: f64,
    pub similarity_score: f64,
    pub skill_match: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub interview_videos: Vec<InterviewVideo>,
    pub suggestions: Vec<String>,
    #[serde(skip)]
    pub primary_field: String,
}

pub struct ScoreEngine {
    dictionary: SkillDictionary,
    skills: SkillExtractor,
    embedder: Box<dyn Embedder>,
    videos: VideoCatalog,
}

impl ScoreEngine {
    pub fn new(
        dictionary: SkillDictionary,
        skills: SkillExtractor,
        embedder: Box<dyn Embedder>,
        videos: VideoCatalog,
    ) -> Self {
        Self {
            dictionary,
            skills,
            embedder,
            videos,
        }
    }

    pub fn score_files<R: Rng + ?Sized>(
        &self,
        resume_path: &Path,
        jd_path: &Path,
        rng: &mut R,
    ) -> Result<ScoreReport, ScoreError> {
        info!("Starting ATS score calculation");
        let resume_text = read_document(resume_path, Document::Resume)?;
        let jd_text = read_document(jd_path, Document::JobDescription)?;
        self.score_texts(&resume_text, &jd_text, rng)
    }

    pub fn score_texts<R: Rng + ?Sized>(
        &self,
        resume_text: &str,
        jd_text: &str,
        rng: &mut R,
    ) -> Result<ScoreReport, ScoreError> {
        if resume_text.trim().is_empty() {
            error!("Empty text extracted from resume");
            return Err(ScoreError::EmptyText(Document::Resume));
        }
        if jd_text.trim().is_empty() {
            error!("Empty text extracted from job description");
            return Err(ScoreError::EmptyText(Document::JobDescription));
        }

        let resume_skills = self.extract_skills(resume_text, Document::Resume);
        let jd_skills = self.extract_skills(jd_text, Document::JobDescription);

        let similarity = match score_similarity(self.embedder.as_ref(), resume_text, jd_text) {
            Ok(sim) => sim.combined.clamp(0.0, 1.0),
            Err(e) => {
                warn!("Similarity calculation failed, using 0.0: {e}");
                0.0
            }
        };

        let matched_skills: Vec<String> = resume_skills.intersection(&jd_skills).cloned().collect();
        let missing_skills: Vec<String> = jd_skills.difference(&resume_skills).cloned().collect();
        let skill_match = skill_match_ratio(matched_skills.len(), jd_skills.len());

        let primary_field = classify_field(&resume_skills, &self.dictionary).to_string();
        let interview_videos = self.videos.recommend(&primary_field, rng);
        let final_score = final_score(similarity, skill_match);

        info!("Final ATS score: {final_score}");
        info!("Primary field detected: {primary_field}");
        info!("Matched skills count: {}", matched_skills.len());
        info!("Missing skills count: {}", missing_skills.len());

        Ok(ScoreReport {
            score: final_score,
            similarity_score: round_percent(similarity),
            skill_match: round_percent(skill_match),
            matched_skills,
            missing_skills,
            interview_videos,
            suggestions: suggestions_for(&primary_field),
            primary_field,
        })
    }

    fn extract_skills(&self, text: &str, document: Document) -> SkillSet {
        self.skills
            .extract(text, &self.dictionary)
            .unwrap_or_else(|e| {
                warn!("Skill extraction failed for {document}, using empty set: {e}");
                SkillSet::new()
            })
    }
}

fn read_document(path: &Path, document: Document) -> Result<String, ScoreError> {
    extract_text(path).map_err(|source| {
        error!("Error extracting text from {}: {source}", path.display());
        ScoreError::Extraction { document, source }
    })
}

/// |matched| / |jd skills|, or 0 when the JD lists no skills.
pub fn skill_match_ratio(matched: usize, jd_total: usize) -> f64 {
    if jd_total == 0 {
        return 0.0;
    }
    matched as f64 / jd_total as f64
}

/// `similarity × 0.6 + skill_match × 0.4` as a percentage with one decimal.
pub fn final_score(similarity: f64, skill_match: f64) -> f64 {
    round_percent(SIMILARITY_WEIGHT * similarity + SKILL_MATCH_WEIGHT * skill_match)
}

fn round_percent(fraction: f64) -> f64 {
    (fraction * 1000.0).round() / 10.0
}
