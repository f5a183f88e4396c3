use crate::{CandidateResult, ExportError, ExtractError, Notification, NotifyError};
use async_trait::async_trait;
use std::path::Path;

pub trait TextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractError>;
}

pub trait SimilarityScorer {
    /// Score in `[0, 100]`. Degenerate inputs score 0.
    fn score(&self, document_text: &str, job_description: &str) -> f64;
}

#[async_trait]
pub trait NotificationSender {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

pub trait ReportExporter {
    fn export(&self, ranked: &[CandidateResult], path: &Path) -> Result<(), ExportError>;
}
