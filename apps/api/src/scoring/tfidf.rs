//! TF-IDF vectorizer fitted jointly on a small document set.
//!
//! Tokens are runs of two or more word characters on lowercased text, English stop
//! words removed. Idf is smoothed: `ln((1 + n) / (1 + df)) + 1`. Rows are L2-normalised,
//! so the cosine of two rows is their dot product.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::scoring::similarity::SimilarityError;
use crate::scoring::stopwords::is_tfidf_stop_word;

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

/// Sparse row: term index → weight.
pub type TfidfRow = BTreeMap<usize, f64>;

#[derive(Debug, Default)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Learns vocabulary and idf from `documents` and returns their weighted rows.
    pub fn fit_transform(&mut self, documents: &[&str]) -> Result<Vec<TfidfRow>, SimilarityError> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d)).collect();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut df: Vec<usize> = Vec::new();
        for tokens in &tokenized {
            let mut seen = std::collections::HashSet::new();
            for token in tokens {
                let next = vocabulary.len();
                let idx = *vocabulary.entry(token.clone()).or_insert(next);
                if idx == df.len() {
                    df.push(0);
                }
                if seen.insert(idx) {
                    df[idx] += 1;
                }
            }
        }

        if vocabulary.is_empty() {
            return Err(SimilarityError::EmptyVocabulary);
        }

        let n = documents.len() as f64;
        self.idf = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();
        self.vocabulary = vocabulary;

        Ok(tokenized.iter().map(|tokens| self.weigh(tokens)).collect())
    }

    fn weigh(&self, tokens: &[String]) -> TfidfRow {
        let mut row = TfidfRow::new();
        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                *row.entry(idx).or_insert(0.0) += 1.0;
            }
        }
        for (idx, weight) in row.iter_mut() {
            *weight *= self.idf[*idx];
        }
        let norm = row.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in row.values_mut() {
                *weight /= norm;
            }
        }
        row
    }
}

fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !is_tfidf_stop_word(t))
        .map(String::from)
        .collect()
}

/// Cosine of two sparse rows.
pub fn sparse_cosine(a: &TfidfRow, b: &TfidfRow) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(idx, wa)| b.get(idx).map(|wb| wa * wb))
        .sum();
    let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Fits a vectorizer on the pair and returns the cosine of their rows, in [0, 1].
pub fn tfidf_similarity(a: &str, b: &str) -> Result<f64, SimilarityError> {
    let rows = TfidfVectorizer::new().fit_transform(&[a, b])?;
    Ok(sparse_cosine(&rows[0], &rows[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenizer_drops_short_tokens_and_stop_words() {
        let tokens = tokenize("I am a Rust dev, and I use R with the Go toolchain");
        assert_eq!(tokens, vec!["rust", "dev", "use", "toolchain"]);
    }

    #[test]
    fn test_identical_documents_score_one() {
        let sim = tfidf_similarity("python tensorflow keras", "python tensorflow keras").unwrap();
        assert!((sim - 1.0).abs() < 1e-9, "sim was {sim}");
    }

    #[test]
    fn test_disjoint_documents_score_zero() {
        let sim = tfidf_similarity("python pandas", "kubernetes docker").unwrap();
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn test_partial_overlap_is_between_bounds() {
        let sim = tfidf_similarity(
            "experienced python tensorflow machine learning",
            "looking python tensorflow keras experience",
        )
        .unwrap();
        assert!(sim > 0.0 && sim < 1.0, "sim was {sim}");
    }

    #[test]
    fn test_only_stop_words_is_empty_vocabulary() {
        let result = tfidf_similarity("the and of", "a an the");
        assert!(matches!(result, Err(SimilarityError::EmptyVocabulary)));
    }

    #[test]
    fn test_rows_are_l2_normalised() {
        let mut vectorizer = TfidfVectorizer::new();
        let rows = vectorizer
            .fit_transform(&["rust rust tokio axum", "rust serde"])
            .unwrap();
        assert_eq!(vectorizer.vocabulary_len(), 4);
        for row in rows {
            let norm: f64 = row.values().map(|w| w * w).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_shared_terms_weigh_less_than_unique_terms() {
        let mut vectorizer = TfidfVectorizer::new();
        let rows = vectorizer.fit_transform(&["rust axum", "rust serde"]).unwrap();
        let rust = vectorizer.vocabulary["rust"];
        let axum = vectorizer.vocabulary["axum"];
        assert!(rows[0][&rust] < rows[0][&axum]);
    }
}
