// PDF parsing and text extraction

use anyhow::{Context, Result};
use lopdf::Document;
use std::path::Path;

/// Text extracted from a PDF document.
#[derive(Debug)]
pub struct PdfText {
    /// Number of pages in the source document
    pub page_count: usize,
    /// Concatenated text of all pages, in page order
    pub content: String,
}

impl PdfText {
    /// Approximate word count of the extracted text.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// Extract the full text of a PDF, page by page in page order.
pub fn extract_pdf(path: &Path) -> Result<PdfText> {
    let doc = Document::load(path)
        .map_err(|e| anyhow::anyhow!("Failed to open PDF {}: {}", path.display(), e))?;

    let pages = doc.get_pages();
    let mut page_numbers: Vec<u32> = pages.keys().copied().collect();
    page_numbers.sort_unstable();

    let mut content = String::new();
    for page_number in &page_numbers {
        let text = doc
            .extract_text(&[*page_number])
            .with_context(|| format!("Failed to extract text from page {}", page_number))?;
        content.push_str(&text);
    }

    Ok(PdfText {
        page_count: page_numbers.len(),
        content,
    })
}
