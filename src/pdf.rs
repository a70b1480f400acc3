//! Page-level text extraction. Pages are 1-indexed; each extracted block is
//! prefixed with a literal page marker so the synthesis prompt can cite
//! physical pages. Out-of-range pages are skipped with a warning.

use std::path::Path;

use crate::core::errors::{AppError, AppResult};

pub fn extract_pages(path: &Path, pages: &[i64]) -> AppResult<String> {
    let bytes =
        std::fs::read(path).map_err(|err| AppError::Io(format!("cannot read PDF: {err}")))?;
    let page_texts = pdf_extract::extract_text_from_mem_by_pages(&bytes)
        .map_err(|err| AppError::Pdf(err.to_string()))?;

    let mut out = String::new();
    for &page in pages {
        let Some(idx) = usize::try_from(page - 1)
            .ok()
            .filter(|idx| *idx < page_texts.len())
        else {
            tracing::warn!(page, "page out of range, skipping");
            continue;
        };
        out.push_str(&format!("\n--- Page {page} ---\n"));
        out.push_str(&page_texts[idx]);
    }
    Ok(out)
}
