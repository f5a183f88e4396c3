use crate::traits::SimilarityScorer;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Corpus size of one comparison: the resume and the job description.
const CORPUS_SIZE: f64 = 2.0;

fn token_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is a valid regex"))
}

/// Lowercased tokens of two or more word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_regex()
        .find_iter(&lowered)
        .map(|token| token.as_str().to_string())
        .collect()
}

fn term_counts(tokens: &[String]) -> HashMap<&str, f64> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0.0) += 1.0;
    }
    counts
}

/// TF-IDF vectors over the two texts' own vocabulary, compared by cosine.
///
/// Term frequency is the raw count, idf is smoothed as
/// `ln((1 + n) / (1 + df)) + 1` and both vectors are L2-normalized, so the
/// dot product is the cosine. Every call builds a fresh vocabulary from the
/// pair being compared.
#[derive(Debug, Default, Clone, Copy)]
pub struct TfidfCosineScorer;

impl TfidfCosineScorer {
    pub fn cosine_similarity(&self, left: &str, right: &str) -> f64 {
        let left_tokens = tokenize(left);
        let right_tokens = tokenize(right);
        let left_counts = term_counts(&left_tokens);
        let right_counts = term_counts(&right_tokens);

        if left_counts.is_empty() || right_counts.is_empty() {
            return 0.0;
        }

        let vocabulary: BTreeSet<&str> = left_counts
            .keys()
            .chain(right_counts.keys())
            .copied()
            .collect();

        let mut left_vector = Vec::with_capacity(vocabulary.len());
        let mut right_vector = Vec::with_capacity(vocabulary.len());
        for term in vocabulary {
            let left_tf = left_counts.get(term).copied().unwrap_or(0.0);
            let right_tf = right_counts.get(term).copied().unwrap_or(0.0);
            let document_frequency = f64::from(u8::from(left_tf > 0.0) + u8::from(right_tf > 0.0));
            let idf = ((1.0 + CORPUS_SIZE) / (1.0 + document_frequency)).ln() + 1.0;

            left_vector.push(left_tf * idf);
            right_vector.push(right_tf * idf);
        }

        l2_normalize(&mut left_vector);
        l2_normalize(&mut right_vector);

        let similarity = left_vector
            .iter()
            .zip(&right_vector)
            .map(|(left, right)| left * right)
            .sum::<f64>();

        if similarity.is_finite() {
            similarity.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

impl SimilarityScorer for TfidfCosineScorer {
    fn score(&self, document_text: &str, job_description: &str) -> f64 {
        self.cosine_similarity(document_text, job_description) * 100.0
    }
}

fn l2_normalize(vector: &mut [f64]) {
    let magnitude = vector.iter().map(|value| value * value).sum::<f64>().sqrt();
    if magnitude > 0.0 {
        for value in vector.iter_mut() {
            *value /= magnitude;
        }
    }
}
