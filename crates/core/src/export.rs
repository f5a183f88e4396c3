use crate::error::ExportError;
use crate::traits::ReportExporter;
use crate::CandidateResult;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

pub const REPORT_COLUMNS: [&str; 3] = ["Resume File", "Score (%)", "Email"];
pub const DEFAULT_REPORT_FILE: &str = "ranked_candidates.xlsx";
pub const WORKSHEET_NAME: &str = "Ranked Candidates";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Xlsx,
    Csv,
}

impl ReportFormat {
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            _ => Err(ExportError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn exporter(self) -> Box<dyn ReportExporter> {
        match self {
            Self::Xlsx => Box::new(XlsxExporter),
            Self::Csv => Box::new(CsvExporter),
        }
    }
}

/// Writes `ranked` to `path` in the format its extension names.
pub fn export_report(ranked: &[CandidateResult], path: &Path) -> Result<(), ExportError> {
    ReportFormat::from_path(path)?.exporter().export(ranked, path)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxExporter;

impl ReportExporter for XlsxExporter {
    fn export(&self, ranked: &[CandidateResult], path: &Path) -> Result<(), ExportError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(WORKSHEET_NAME)?;

        let header_format = Format::new().set_bold();
        let score_format = Format::new().set_num_format("0.00");

        for (col, header) in (0u16..).zip(REPORT_COLUMNS) {
            worksheet.write_string_with_format(0, col, header, &header_format)?;
        }

        for (index, candidate) in ranked.iter().enumerate() {
            let row = row_number(index)?;
            worksheet.write_string(row, 0, candidate.file_name.as_str())?;
            worksheet.write_number_with_format(row, 1, candidate.score, &score_format)?;
            worksheet.write_string(row, 2, candidate.email_label())?;
        }

        worksheet.set_column_width(0, 40)?;
        worksheet.set_column_width(2, 32)?;

        workbook.save(path)?;
        Ok(())
    }
}

/// Worksheet row of the candidate at `index`; row 0 holds the header.
fn row_number(index: usize) -> Result<u32, ExportError> {
    index
        .checked_add(1)
        .and_then(|row| u32::try_from(row).ok())
        .ok_or(ExportError::TooManyRows(index))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CsvExporter;

impl ReportExporter for CsvExporter {
    fn export(&self, ranked: &[CandidateResult], path: &Path) -> Result<(), ExportError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(REPORT_COLUMNS)?;

        for candidate in ranked {
            let score = format!("{:.2}", candidate.score);
            writer.write_record([
                candidate.file_name.as_str(),
                score.as_str(),
                candidate.email_label(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}
