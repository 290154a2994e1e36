//! Document extraction: turns an uploaded PDF into plain text.
//!
//! Page texts are joined with `\n` in page order. Pages that yield no text
//! (scanned images, blank pages) are skipped silently.

use std::panic::{self, AssertUnwindSafe};

use bytes::Bytes;
use thiserror::Error;
use tracing::info;

const PDF_MAGIC: &[u8] = b"%PDF-";
const HEADER_SEARCH_LIMIT: usize = 1024;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("uploaded file is not a PDF")]
    NotPdf,

    #[error("could not parse PDF: {0}")]
    Parse(String),
}

/// Extracts the text of every page of a PDF held in memory.
pub fn extract_text_from_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    if !has_pdf_header(bytes) {
        return Err(ExtractionError::NotPdf);
    }

    // pdf-extract panics on some malformed inputs instead of returning an error.
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|payload| ExtractionError::Parse(panic_message(payload.as_ref())))?
    .map_err(|e| ExtractionError::Parse(e.to_string()))?;

    let page_count = pages.len();
    let text = join_page_texts(pages);
    info!(
        "Extracted {} chars from {} page(s)",
        text.chars().count(),
        page_count
    );
    Ok(text)
}

/// Runs [`extract_text_from_pdf`] on the blocking pool; parsing is CPU-bound.
pub async fn extract_text_blocking(bytes: Bytes) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extract_text_from_pdf(&bytes))
        .await
        .map_err(|e| ExtractionError::Parse(format!("extraction task failed: {e}")))?
}

/// Joins per-page text with newlines, dropping pages with no text.
pub fn join_page_texts<I>(pages: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    pages
        .into_iter()
        .filter_map(|page| {
            let trimmed = page.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Readers accept leading junk before the header within the first KiB.
fn has_pdf_header(bytes: &[u8]) -> bool {
    bytes[..bytes.len().min(HEADER_SEARCH_LIMIT)]
        .windows(PDF_MAGIC.len())
        .any(|w| w == PDF_MAGIC)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "PDF parser panicked".to_string()
    }
}
