//! Skill extraction: entity recognition plus whole-word dictionary matching,
//! minus common words and stop words.

use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::info;

use crate::scoring::dictionary::SkillDictionary;
use crate::scoring::stopwords::is_denied_skill;

/// Normalized, lowercase, duplicate-free skills. Iterates in sorted order.
pub type SkillSet = BTreeSet<String>;

pub const SKILL_LABEL: &str = "SKILL";

#[derive(Debug, Error)]
pub enum SkillError {
    #[error("Entity recognition failed: {0}")]
    Recognition(String),
}

/// A labelled span found by an `EntityRecognizer`.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub text: String,
    pub label: String,
}

/// Named-entity recognition backend. Loaded once at startup and shared across requests.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>, SkillError>;
}

/// Tags nothing. General-purpose English NER models emit no `SKILL` label, so dictionary
/// matching carries extraction until a skill-aware model is plugged in.
#[derive(Debug, Default)]
pub struct NoEntityRecognizer;

impl EntityRecognizer for NoEntityRecognizer {
    fn recognize(&self, _text: &str) -> Result<Vec<Entity>, SkillError> {
        Ok(Vec::new())
    }
}

/// Lowercases, keeps only `[a-z0-9+# ]`, then trims.
pub fn clean_skill(skill: &str) -> String {
    let kept: String = skill
        .to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '+' | '#' | ' '))
        .collect();
    kept.trim().to_string()
}

pub struct SkillExtractor {
    recognizer: Box<dyn EntityRecognizer>,
}

impl SkillExtractor {
    pub fn new(recognizer: Box<dyn EntityRecognizer>) -> Self {
        Self { recognizer }
    }

    pub fn extract(&self, text: &str, dictionary: &SkillDictionary) -> Result<SkillSet, SkillError> {
        let text = text.to_lowercase();
        let mut skills = SkillSet::new();

        // Model-backed recognizers may panic on odd input; treat that as a failed recognition.
        let entities = panic::catch_unwind(AssertUnwindSafe(|| self.recognizer.recognize(&text)))
            .map_err(|_| SkillError::Recognition("recognizer panicked".to_string()))??;

        for entity in entities {
            if entity.label != SKILL_LABEL {
                continue;
            }
            let cleaned = clean_skill(&entity.text);
            if cleaned.len() > 2 {
                skills.insert(cleaned);
            }
        }

        skills.extend(dictionary.find_in(&text).map(String::from));
        skills.retain(|s| !is_denied_skill(s));

        info!("Extracted {} skills", skills.len());
        Ok(skills)
    }
}
