pub mod dictionary;
pub mod engine;
pub mod recommend;
pub mod similarity;
pub mod skills;
pub mod stopwords;
pub mod tfidf;
