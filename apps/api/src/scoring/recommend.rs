//! Primary-field classification and interview-prep recommendations.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::scoring::dictionary::SkillDictionary;
use crate::scoring::skills::SkillSet;

pub const GENERAL_FIELD: &str = "General";

const FIELD_VIDEOS_PER_RESULT: usize = 2;

/// A curated video. Serialises as a `[title, url]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InterviewVideo(pub &'static str, pub &'static str);

/// Picks the category sharing the most skills with `skills`.
/// The first category wins a tie; an empty skill set yields `General`.
pub fn classify_field<'a>(skills: &SkillSet, dictionary: &'a SkillDictionary) -> &'a str {
    if skills.is_empty() {
        return GENERAL_FIELD;
    }

    let mut best: Option<(&str, usize)> = None;
    for category in dictionary.categories() {
        let overlap = category.skills.intersection(skills).count();
        match best {
            Some((_, count)) if count >= overlap => {}
            _ => best = Some((category.name, overlap)),
        }
    }
    best.map(|(name, _)| name).unwrap_or(GENERAL_FIELD)
}

/// Per-field curated video lists plus the general list.
#[derive(Debug)]
pub struct VideoCatalog {
    fields: Vec<(&'static str, Vec<InterviewVideo>)>,
    general: Vec<InterviewVideo>,
}

impl VideoCatalog {
    pub fn new(fields: Vec<(&'static str, Vec<InterviewVideo>)>, general: Vec<InterviewVideo>) -> Self {
        Self { fields, general }
    }

    pub fn interview_prep() -> Self {
        Self::new(
            vec![
                (
                    "Data Science",
                    vec![
                        InterviewVideo("Data Science Interview Questions", "https://youtu.be/Ji46s5BHdr0"),
                        InterviewVideo("Machine Learning Interview Prep", "https://youtu.be/seVxXHi2YMs"),
                        InterviewVideo("SQL Interview Questions", "https://youtu.be/9FgfsLa_SmY"),
                    ],
                ),
                (
                    "Software Engineering",
                    vec![
                        InterviewVideo("Software Engineer Interview Questions", "https://youtu.be/2HQmjLu-6RQ"),
                        InterviewVideo("System Design Interview Prep", "https://youtu.be/DQd_AlIvHUw"),
                        InterviewVideo("Coding Interview Tips", "https://youtu.be/oVVdezJ0e7w"),
                    ],
                ),
                (
                    "Web Development",
                    vec![
                        InterviewVideo("Frontend Interview Questions", "https://youtu.be/JZK1MZwUyUU"),
                        InterviewVideo("JavaScript Interview Prep", "https://youtu.be/CyXLhHQS3KY"),
                        InterviewVideo("React Interview Questions", "https://youtu.be/pbczsLkv7Cc"),
                    ],
                ),
                (GENERAL_FIELD, general_videos()),
            ],
            general_videos(),
        )
    }

    fn field_videos(&self, field: &str) -> &[InterviewVideo] {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, videos)| videos.as_slice())
            .unwrap_or(&[])
    }

    /// Up to two distinct field videos followed by one general video, sampled from `rng`.
    pub fn recommend<R: Rng + ?Sized>(&self, field: &str, rng: &mut R) -> Vec<InterviewVideo> {
        let field_videos = self.field_videos(field);
        let mut selected: Vec<InterviewVideo> = field_videos
            .choose_multiple(rng, FIELD_VIDEOS_PER_RESULT.min(field_videos.len()))
            .copied()
            .collect();
        selected.extend(self.general.choose(rng).copied());

        info!(
            "Selected {} interview videos for field: {field}",
            selected.len()
        );
        selected
    }
}

fn general_videos() -> Vec<InterviewVideo> {
    vec![
        InterviewVideo("Top Interview Tips", "https://youtu.be/y8YH0Qbu5h4"),
        InterviewVideo("Behavioral Interview Questions", "https://youtu.be/yp693O87GmM"),
        InterviewVideo("How to Answer Tell Me About Yourself", "https://youtu.be/UeMmCex9uTU"),
    ]
}

pub fn suggestions_for(field: &str) -> Vec<String> {
    vec![
        format!("Focus on {field} interview preparation"),
        "Practice explaining your projects clearly".to_string(),
        "Review common technical interview questions".to_string(),
    ]
}
