//! Static category → skill dictionary. Built once at startup and never mutated.

use std::collections::BTreeSet;

use regex::Regex;

const DATA_SCIENCE: &[&str] = &[
    "python",
    "r",
    "sql",
    "tensorflow",
    "keras",
    "pytorch",
    "scikit-learn",
    "pandas",
    "numpy",
    "matplotlib",
    "seaborn",
    "machine learning",
    "deep learning",
    "nlp",
    "computer vision",
    "statistical analysis",
    "data visualization",
    "big data",
];

const SOFTWARE_ENGINEERING: &[&str] = &[
    "java",
    "c++",
    "c#",
    "javascript",
    "typescript",
    "go",
    "rust",
    "object-oriented programming",
    "design patterns",
    "data structures",
    "algorithms",
    "software architecture",
    "microservices",
    "rest api",
    "graphql",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
];

const WEB_DEVELOPMENT: &[&str] = &[
    "html",
    "css",
    "javascript",
    "react",
    "angular",
    "vue",
    "node.js",
    "express",
    "django",
    "flask",
    "spring",
    "laravel",
    "php",
    "responsive design",
    "web accessibility",
    "seo",
    "web performance",
];

/// A named group of canonical skills with their precompiled whole-word patterns.
#[derive(Debug)]
pub struct SkillCategory {
    pub name: &'static str,
    pub skills: BTreeSet<String>,
    patterns: Vec<(String, Regex)>,
}

impl SkillCategory {
    fn new(name: &'static str, skills: &[&str]) -> Result<Self, regex::Error> {
        let skills: BTreeSet<String> = skills.iter().map(|s| s.to_string()).collect();
        let patterns = skills
            .iter()
            .map(|skill| {
                let re = Regex::new(&format!(r"\b{}\b", regex::escape(skill)))?;
                Ok((skill.clone(), re))
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self {
            name,
            skills,
            patterns,
        })
    }

    /// Skills of this category occurring in `text` as whole words.
    pub fn matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.patterns
            .iter()
            .filter(move |(_, re)| re.is_match(text))
            .map(|(skill, _)| skill.as_str())
    }
}

/// Ordered list of skill categories. Iteration order is declaration order.
#[derive(Debug)]
pub struct SkillDictionary {
    categories: Vec<SkillCategory>,
}

impl SkillDictionary {
    /// The technical skills dictionary: Data Science, Software Engineering, Web Development.
    pub fn technical() -> Result<Self, regex::Error> {
        Self::from_categories(&[
            ("Data Science", DATA_SCIENCE),
            ("Software Engineering", SOFTWARE_ENGINEERING),
            ("Web Development", WEB_DEVELOPMENT),
        ])
    }

    pub fn from_categories(categories: &[(&'static str, &[&str])]) -> Result<Self, regex::Error> {
        let categories = categories
            .iter()
            .map(|(name, skills)| SkillCategory::new(*name, skills))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    /// Every dictionary skill found in `text` (lowercased by the caller).
    pub fn find_in<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.categories.iter().flat_map(move |c| c.matches(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order_is_declaration_order() {
        let dict = SkillDictionary::technical().unwrap();
        let names: Vec<&str> = dict.categories().iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec!["Data Science", "Software Engineering", "Web Development"]
        );
    }

    #[test]
    fn test_whole_word_matching() {
        let dict = SkillDictionary::technical().unwrap();
        let found: BTreeSet<&str> = dict.find_in("i trust rusty tools").collect();
        assert!(!found.contains("rust"));

        let found: BTreeSet<&str> = dict.find_in("rust and go in production").collect();
        assert!(found.contains("rust"));
        assert!(found.contains("go"));
    }

    #[test]
    fn test_multi_word_and_punctuated_skills() {
        let dict = SkillDictionary::technical().unwrap();
        let found: BTreeSet<&str> = dict
            .find_in("built machine learning pipelines with scikit-learn and node.js")
            .collect();
        assert!(found.contains("machine learning"));
        assert!(found.contains("scikit-learn"));
        assert!(found.contains("node.js"));
    }

    #[test]
    fn test_single_letter_skill_needs_word_boundary() {
        let dict = SkillDictionary::technical().unwrap();
        assert!(dict.find_in("statistics in r and sql").any(|s| s == "r"));
        assert!(!dict.find_in("running servers").any(|s| s == "r"));
    }

    #[test]
    fn test_shared_skill_reported_per_category() {
        let dict = SkillDictionary::technical().unwrap();
        let hits = dict.find_in("javascript").filter(|s| *s == "javascript").count();
        assert_eq!(hits, 2);
    }
}
