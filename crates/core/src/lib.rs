pub mod email;
pub mod error;
pub mod export;
pub mod extractor;
pub mod models;
pub mod notifier;
pub mod pipeline;
pub mod ranking;
pub mod scoring;
pub mod traits;

pub use email::find_email;
pub use error::{ExportError, ExtractError, NotifyError, RankError};
pub use export::{
    export_report, CsvExporter, ReportFormat, XlsxExporter, DEFAULT_REPORT_FILE, REPORT_COLUMNS,
};
pub use extractor::{discover_pdf_files, document_name, extract_or_empty, LopdfExtractor};
pub use models::{
    CandidateResult, Document, DocumentWarning, RankingOptions, RankingReport, SkipReason,
    DEFAULT_SCORE_THRESHOLD, MISSING_EMAIL_LABEL,
};
pub use notifier::{
    notify_candidates, DeliveryStatus, MailConfig, Notification, NotificationOutcome,
    NotificationTemplate, SmtpSender, DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT,
};
pub use pipeline::RankingPipeline;
pub use ranking::rank_candidates;
pub use scoring::{tokenize, TfidfCosineScorer};
pub use traits::{NotificationSender, ReportExporter, SimilarityScorer, TextExtractor};
