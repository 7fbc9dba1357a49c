// src/linkedin/pdf_text.rs
//! Page-ordered text extraction from PDF exports

use anyhow::{Context, Result};
use lopdf::Document;
use std::path::Path;
use tracing::debug;

use super::error::ImportError;

/// A paged document the extractor can read text from
pub trait PageSource {
    /// Page numbers, 1-based
    fn page_numbers(&self) -> Vec<u32>;
    fn page_text(&self, page_number: u32) -> Result<String, ImportError>;
}

impl PageSource for Document {
    fn page_numbers(&self) -> Vec<u32> {
        self.get_pages().keys().copied().collect()
    }

    fn page_text(&self, page_number: u32) -> Result<String, ImportError> {
        self.extract_text(&[page_number])
            .map_err(|e| ImportError::extraction(format!("page {}: {}", page_number, e)))
    }
}

/// Concatenate every page's text, page 1 first, newline separated
pub fn flatten_pages<S: PageSource + ?Sized>(source: &S) -> Result<String, ImportError> {
    let mut pages = source.page_numbers();
    if pages.is_empty() {
        return Err(ImportError::extraction("document has no pages"));
    }
    pages.sort_unstable();

    let mut text = String::new();
    for (index, page_number) in pages.iter().enumerate() {
        let page = source.page_text(*page_number)?;
        if index > 0 {
            text.push('\n');
        }
        text.push_str(page.trim_end_matches(['\n', '\r']));
    }

    debug!("Extracted {} chars from {} pages", text.len(), pages.len());
    Ok(text)
}

/// Decode PDF bytes into one flat text stream
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ImportError> {
    let document = Document::load_mem(bytes)
        .map_err(|e| ImportError::extraction(format!("unreadable PDF: {}", e)))?;

    if document.is_encrypted() {
        return Err(ImportError::extraction("encrypted PDF"));
    }

    flatten_pages(&document)
}

/// Read a PDF export from disk
pub async fn read_pdf_file(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

/// In-memory PDF with one text line per `BT`/`ET` block, for tests
#[cfg(test)]
pub(crate) fn pdf_fixture(pages: &[&[&str]]) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (index, line) in lines.iter().enumerate() {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![Object::Integer(72), Object::Integer(760 - 16 * index as i64)],
            ));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode page content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = Object::Integer(kids.len() as i64);
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(595),
                Object::Integer(842),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize fixture PDF");
    bytes
}
