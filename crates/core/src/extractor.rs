use crate::error::ExtractError;
use crate::traits::TextExtractor;
use lopdf::Document;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl TextExtractor for LopdfExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractError> {
        let bytes = std::fs::read(path)?;
        let document =
            Document::load_mem(&bytes).map_err(|error| ExtractError::PdfParse(error.to_string()))?;

        // Pages that fail to decode are dropped; the rest still count.
        let mut text = String::new();
        for page_no in document.get_pages().into_keys() {
            if let Ok(page_text) = document.extract_text(&[page_no]) {
                text.push_str(&page_text);
            }
        }

        Ok(text)
    }
}

/// Best-effort extraction: a failure becomes empty text plus the failure message.
pub fn extract_or_empty<E>(extractor: &E, path: &Path) -> (String, Option<String>)
where
    E: TextExtractor + ?Sized,
{
    match extractor.extract_text(path) {
        Ok(text) => (text, None),
        Err(error) => (String::new(), Some(error.to_string())),
    }
}

pub fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

pub fn discover_pdf_files(folder: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .into_iter()
        .filter_map(|item| item.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let is_pdf = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

        if is_pdf {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort_unstable();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn discover_pdf_files_is_recursive_and_sorted() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let base = dir.path();
        let nested = base.join("nested");
        fs::create_dir(&nested)?;

        File::create(base.join("b.PDF")).and_then(|mut file| file.write_all(b"%PDF-1.4\n%fake"))?;
        File::create(nested.join("a.pdf"))
            .and_then(|mut file| file.write_all(b"%PDF-1.4\n%fake"))?;
        fs::write(base.join("notes.txt"), b"not a resume")?;

        let files = discover_pdf_files(base);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0], base.join("b.PDF"));
        assert_eq!(files[1], nested.join("a.pdf"));
        Ok(())
    }

    fn write_pdf(path: &Path, pages: &[&str]) -> Result<(), Box<dyn std::error::Error>> {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = document.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for line in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*line)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = document.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = document.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);
        document.save(path)?;
        Ok(())
    }

    #[test]
    fn pages_are_concatenated_in_document_order() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("resume.pdf");
        write_pdf(&path, &["Rust engineer jane@example.com", "Kafka systems"])?;

        let text = LopdfExtractor.extract_text(&path)?;

        let first = text.find("Rust engineer").expect("first page text");
        let second = text.find("Kafka systems").expect("second page text");
        assert!(first < second, "pages out of order: {text:?}");
        assert_eq!(crate::find_email(&text), Some("jane@example.com"));
        Ok(())
    }

    #[test]
    fn corrupt_pdf_is_a_parse_error() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"%PDF-1.4\n%broken")?;

        let result = LopdfExtractor.extract_text(&path);
        assert!(matches!(result, Err(ExtractError::PdfParse(_))));
        Ok(())
    }

    #[test]
    fn missing_file_degrades_to_empty_text() {
        let (text, failure) =
            extract_or_empty(&LopdfExtractor, Path::new("/definitely/not/here.pdf"));

        assert!(text.is_empty());
        let failure = failure.expect("missing file should report a failure");
        assert!(failure.starts_with("io error"));
    }

    #[test]
    fn document_name_uses_file_name() {
        assert_eq!(document_name(Path::new("/tmp/resumes/jane.pdf")), "jane.pdf");
    }
}
