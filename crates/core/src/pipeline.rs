use crate::error::RankError;
use crate::extractor::{document_name, extract_or_empty, LopdfExtractor};
use crate::ranking::rank_candidates;
use crate::scoring::TfidfCosineScorer;
use crate::traits::{SimilarityScorer, TextExtractor};
use crate::{
    find_email, CandidateResult, Document, DocumentWarning, RankingOptions, RankingReport,
    SkipReason,
};
use chrono::Utc;
use std::path::PathBuf;
use uuid::Uuid;

pub struct RankingPipeline<E, S>
where
    E: TextExtractor,
    S: SimilarityScorer,
{
    extractor: E,
    scorer: S,
}

impl Default for RankingPipeline<LopdfExtractor, TfidfCosineScorer> {
    fn default() -> Self {
        Self::new(LopdfExtractor, TfidfCosineScorer)
    }
}

impl<E, S> RankingPipeline<E, S>
where
    E: TextExtractor,
    S: SimilarityScorer,
{
    pub fn new(extractor: E, scorer: S) -> Self {
        Self { extractor, scorer }
    }

    /// Extracts, scores and ranks `uploads` in order against `job_description`.
    ///
    /// Only input validation fails the call. Documents that cannot be read or
    /// carry no text are reported in `RankingReport::warnings` and skipped.
    pub fn rank(
        &self,
        uploads: &[PathBuf],
        job_description: &str,
        options: &RankingOptions,
    ) -> Result<RankingReport, RankError> {
        validate_inputs(uploads, job_description, options)?;

        let mut candidates = Vec::new();
        let mut warnings = Vec::new();

        for path in uploads {
            let name = document_name(path);
            let (text, failure) = extract_or_empty(&self.extractor, path);

            if let Some(details) = failure {
                warnings.push(DocumentWarning {
                    file_name: name,
                    reason: SkipReason::Unreadable(details),
                });
                continue;
            }

            if text.trim().is_empty() {
                warnings.push(DocumentWarning {
                    file_name: name,
                    reason: SkipReason::NoText,
                });
                continue;
            }

            candidates.push(self.evaluate(Document { name, text }, job_description));
        }

        let documents_scored = candidates.len();

        Ok(RankingReport {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            threshold: options.threshold,
            documents_received: uploads.len(),
            documents_scored,
            ranked: rank_candidates(candidates, options.threshold),
            warnings,
        })
    }

    pub fn evaluate(&self, document: Document, job_description: &str) -> CandidateResult {
        let score = self.scorer.score(&document.text, job_description);
        let email = find_email(&document.text).map(str::to_string);

        CandidateResult {
            file_name: document.name,
            email,
            score,
            text: document.text,
        }
    }
}

fn validate_inputs(
    uploads: &[PathBuf],
    job_description: &str,
    options: &RankingOptions,
) -> Result<(), RankError> {
    if uploads.is_empty() {
        return Err(RankError::InvalidInput("no resumes were uploaded".to_string()));
    }

    if job_description.trim().is_empty() {
        return Err(RankError::InvalidInput("job description is empty".to_string()));
    }

    if !options.threshold.is_finite() || !(0.0..=100.0).contains(&options.threshold) {
        return Err(RankError::InvalidInput(format!(
            "score threshold {} is outside 0..=100",
            options.threshold
        )));
    }

    Ok(())
}
