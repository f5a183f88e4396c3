use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_SCORE_THRESHOLD: f64 = 50.0;
pub const MISSING_EMAIL_LABEL: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateResult {
    pub file_name: String,
    pub email: Option<String>,
    pub score: f64,
    pub text: String,
}

impl CandidateResult {
    pub fn email_label(&self) -> &str {
        self.email.as_deref().unwrap_or(MISSING_EMAIL_LABEL)
    }

    /// First `max_chars` characters of the extracted text, cut on a char boundary.
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.text.char_indices().nth(max_chars) {
            Some((byte_index, _)) => &self.text[..byte_index],
            None => &self.text,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RankingOptions {
    pub threshold: f64,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SCORE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "details", rename_all = "snake_case")]
pub enum SkipReason {
    Unreadable(String),
    NoText,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentWarning {
    pub file_name: String,
    pub reason: SkipReason,
}

impl std::fmt::Display for DocumentWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            SkipReason::Unreadable(details) => {
                write!(f, "error reading PDF {}: {details}", self.file_name)
            }
            SkipReason::NoText => write!(f, "could not extract text from {}", self.file_name),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub threshold: f64,
    pub documents_received: usize,
    pub documents_scored: usize,
    pub ranked: Vec<CandidateResult>,
    pub warnings: Vec<DocumentWarning>,
}
