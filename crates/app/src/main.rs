use chrono::Utc;
use clap::{Parser, Subcommand};
use resume_ranker_core::{
    discover_pdf_files, export_report, find_email, notify_candidates, CandidateResult,
    DocumentWarning, LopdfExtractor, MailConfig, NotificationTemplate, RankingOptions,
    RankingPipeline, RankingReport, SmtpSender, TextExtractor, DEFAULT_REPORT_FILE,
    DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT, MISSING_EMAIL_LABEL, REPORT_COLUMNS,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "resume-ranker", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Address notifications are sent from
    #[arg(long, env = "EMAIL_ADDRESS")]
    sender_address: Option<String>,

    /// Password for the sender's mail account
    #[arg(long, env = "EMAIL_PASSWORD", hide_env_values = true)]
    sender_password: Option<String>,

    /// SMTP relay host (implicit TLS)
    #[arg(long, env = "SMTP_HOST", default_value = DEFAULT_SMTP_HOST)]
    smtp_host: String,

    /// SMTP relay port
    #[arg(long, env = "SMTP_PORT", default_value_t = DEFAULT_SMTP_PORT)]
    smtp_port: u16,
}

#[derive(Subcommand)]
enum Command {
    /// Rank resumes against a job description, export the shortlist and optionally notify it.
    Rank {
        /// Resume PDF; repeat for several files. Processed in the given order.
        #[arg(long = "resume")]
        resumes: Vec<PathBuf>,
        /// Folder searched recursively for resume PDFs.
        #[arg(long)]
        folder: Option<PathBuf>,
        /// Job description text.
        #[arg(long, conflicts_with = "job_description_file")]
        job_description: Option<String>,
        /// File holding the job description text.
        #[arg(long, required_unless_present = "job_description")]
        job_description_file: Option<PathBuf>,
        /// Minimum score (percent) a resume needs to be shortlisted.
        #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
        threshold: u8,
        /// Email every shortlisted candidate that has an address.
        #[arg(long, default_value_t = false)]
        notify: bool,
        /// Report file; `.xlsx` or `.csv`.
        #[arg(long, default_value = DEFAULT_REPORT_FILE)]
        output: PathBuf,
        /// Print the extracted text of each shortlisted resume.
        #[arg(long, default_value_t = false)]
        preview: bool,
        /// Maximum characters printed per preview.
        #[arg(long, default_value = "1500")]
        preview_chars: usize,
        /// Print the ranking report as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the text and contact address extracted from one resume.
    Extract {
        #[arg(long)]
        resume: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "resume-ranker boot"
    );

    let mail_config = MailConfig {
        sender_address: cli.sender_address,
        sender_password: cli.sender_password,
        smtp_host: cli.smtp_host,
        smtp_port: cli.smtp_port,
    };

    match cli.command {
        Command::Rank {
            resumes,
            folder,
            job_description,
            job_description_file,
            threshold,
            notify,
            output,
            preview,
            preview_chars,
            json,
        } => {
            let job_description = match (job_description, job_description_file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path).map_err(|error| {
                    anyhow::anyhow!("unable to read job description {}: {error}", path.display())
                })?,
                (None, None) => String::new(),
            };
            let uploads = collect_uploads(resumes, folder.as_deref());
            let options = RankingOptions {
                threshold: f64::from(threshold),
            };

            let report = RankingPipeline::default()
                .rank(&uploads, &job_description, &options)
                .map_err(|error| anyhow::anyhow!(error.to_string()))?;

            info!(
                run_id = %report.run_id,
                received = report.documents_received,
                scored = report.documents_scored,
                ranked = report.ranked.len(),
                "ranking complete"
            );
            for warning in &report.warnings {
                warn!(run_id = %report.run_id, file = %warning.file_name, "{warning}");
            }

            let console = Console { json };
            // Shown whatever the log filter is.
            for line in render_warnings(&report.warnings).lines() {
                console.line(line);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report, preview.then_some(preview_chars));
            }

            if report.ranked.is_empty() {
                return Ok(());
            }

            match export_report(&report.ranked, &output) {
                Ok(()) => console.line(&format!("report written to {}", output.display())),
                Err(error) => {
                    warn!(path = %output.display(), error = %error, "report export failed");
                    console.line(&format!("Unable to write report {}: {error}", output.display()));
                }
            }

            if notify {
                console.line("Sending emails to shortlisted candidates...");
                let sender = SmtpSender::new(mail_config);
                let outcomes =
                    notify_candidates(&sender, &report.ranked, &NotificationTemplate::default())
                        .await;

                for outcome in outcomes {
                    if outcome.is_sent() {
                        console.line(&format!(
                            "Email sent to {} ({})",
                            outcome.file_name, outcome.recipient
                        ));
                    } else {
                        warn!(
                            run_id = %report.run_id,
                            recipient = %outcome.recipient,
                            status = ?outcome.status,
                            "email delivery failed"
                        );
                        console.line(&format!(
                            "Failed to send email to {} ({})",
                            outcome.file_name, outcome.recipient
                        ));
                    }
                }
            }
        }
        Command::Extract { resume } => {
            let text = LopdfExtractor
                .extract_text(&resume)
                .map_err(|error| anyhow::anyhow!(error.to_string()))?;

            println!("file: {}", resume.display());
            println!("email: {}", find_email(&text).unwrap_or(MISSING_EMAIL_LABEL));
            println!("text:\n{text}");
        }
    }

    Ok(())
}

/// Status lines go to stderr when stdout carries JSON.
struct Console {
    json: bool,
}

impl Console {
    fn line(&self, message: &str) {
        if self.json {
            eprintln!("{message}");
        } else {
            println!("{message}");
        }
    }
}

fn collect_uploads(mut resumes: Vec<PathBuf>, folder: Option<&Path>) -> Vec<PathBuf> {
    if let Some(folder) = folder {
        resumes.extend(discover_pdf_files(folder));
    }
    resumes
}

fn print_report(report: &RankingReport, preview_chars: Option<usize>) {
    if report.ranked.is_empty() {
        println!("No candidates found above the score threshold.");
        return;
    }

    println!(
        "Found {} candidates above {}% score",
        report.ranked.len(),
        report.threshold
    );
    print!("{}", render_table(&report.ranked));

    if let Some(max_chars) = preview_chars {
        for candidate in &report.ranked {
            println!();
            println!("[{}] Score: {:.2}%", candidate.file_name, candidate.score);
            println!("{}", candidate.preview(max_chars));
        }
    }
}

fn render_warnings(warnings: &[DocumentWarning]) -> String {
    warnings
        .iter()
        .map(|warning| format!("Warning: {warning}\n"))
        .collect()
}

fn render_table(ranked: &[CandidateResult]) -> String {
    let scores: Vec<String> = ranked
        .iter()
        .map(|candidate| format!("{:.2}", candidate.score))
        .collect();

    let file_width = ranked
        .iter()
        .map(|candidate| candidate.file_name.chars().count())
        .chain([REPORT_COLUMNS[0].len()])
        .max()
        .unwrap_or_default();
    let score_width = scores
        .iter()
        .map(String::len)
        .chain([REPORT_COLUMNS[1].len()])
        .max()
        .unwrap_or_default();

    let mut table = format!(
        "{:<file_width$}  {:>score_width$}  {}\n",
        REPORT_COLUMNS[0], REPORT_COLUMNS[1], REPORT_COLUMNS[2]
    );
    for (candidate, score) in ranked.iter().zip(&scores) {
        table.push_str(&format!(
            "{:<file_width$}  {:>score_width$}  {}\n",
            candidate.file_name,
            score,
            candidate.email_label()
        ));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use resume_ranker_core::SkipReason;

    fn candidate(name: &str, score: f64, email: Option<&str>) -> CandidateResult {
        CandidateResult {
            file_name: name.to_string(),
            email: email.map(str::to_string),
            score,
            text: String::new(),
        }
    }

    #[test]
    fn table_aligns_columns_and_marks_missing_email() {
        let table = render_table(&[
            candidate("alice_long_name.pdf", 91.234, Some("alice@example.com")),
            candidate("bob.pdf", 7.0, None),
        ]);

        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Resume File          Score (%)  Email");
        assert_eq!(lines[1], "alice_long_name.pdf      91.23  alice@example.com");
        assert_eq!(lines[2], "bob.pdf                   7.00  N/A");
    }

    #[test]
    fn skipped_documents_are_rendered_as_warnings() {
        let rendered = render_warnings(&[
            DocumentWarning {
                file_name: "corrupt.pdf".to_string(),
                reason: SkipReason::Unreadable("pdf parse error: invalid file header".to_string()),
            },
            DocumentWarning {
                file_name: "scan.pdf".to_string(),
                reason: SkipReason::NoText,
            },
        ]);

        assert_eq!(
            rendered,
            "Warning: error reading PDF corrupt.pdf: pdf parse error: invalid file header\n\
             Warning: could not extract text from scan.pdf\n"
        );
        assert!(render_warnings(&[]).is_empty());
    }

    #[test]
    fn explicit_resumes_keep_their_order() {
        let uploads = collect_uploads(
            vec![PathBuf::from("b.pdf"), PathBuf::from("a.pdf")],
            None,
        );
        assert_eq!(uploads, vec![PathBuf::from("b.pdf"), PathBuf::from("a.pdf")]);
    }
}
