// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use lopdf::content::Content;
use lopdf::{Document, Object};
use tallysheet::application::Session;
use tallysheet::domain::Ledger;
use tempfile::TempDir;

/// Helper to create a session on the example sheet plus a scratch directory
/// for exported reports
pub fn test_session() -> Result<(Session, TempDir)> {
    let temp_dir = TempDir::new()?;
    Ok((Session::new(Ledger::seeded()), temp_dir))
}

/// Sum entry values the same way the ledger does
pub fn expected_total(ledger: &Ledger) -> f64 {
    ledger.entries().iter().fold(0.0, |sum, e| sum + e.value)
}

/// Parsed view of a generated PDF: page count, drawn strings in order and
/// the number of stroked rules
pub struct PdfSummary {
    pub pages: usize,
    pub texts: Vec<String>,
    pub rules: usize,
}

pub fn inspect_pdf(bytes: &[u8]) -> Result<PdfSummary> {
    let doc = Document::load_mem(bytes)?;
    let pages = doc.get_pages();

    let mut texts = Vec::new();
    let mut rules = 0;
    for page_id in pages.values() {
        let content = Content::decode(&doc.get_page_content(*page_id)?)?;
        for operation in &content.operations {
            match operation.operator.as_str() {
                "Tj" => {
                    for operand in &operation.operands {
                        if let Object::String(bytes, _) = operand {
                            texts.push(String::from_utf8_lossy(bytes).into_owned());
                        }
                    }
                }
                "S" => rules += 1,
                _ => {}
            }
        }
    }

    Ok(PdfSummary {
        pages: pages.len(),
        texts,
        rules,
    })
}
