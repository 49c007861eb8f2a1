//! Loading insurer document directories.
//!
//! The CLI consumes pre-extracted plain text: one `<category>.txt` per
//! document category with pages separated by form-feed, plus a
//! `coverages.json` listing the coverage items to resolve. The PDF/CSV
//! extraction pipeline that produces these files lives outside this tool.

use crate::error::{CliError, Result};
use covgate_domain::{CoverageRef, DocCategory, DocumentSource};
use covgate_resolver::{DocumentSet, PagedTextDocument};
use std::path::Path;
use tracing::debug;

/// Read the coverage list for an insurer directory
pub fn load_coverages(dir: &Path) -> Result<Vec<CoverageRef>> {
    let path = dir.join("coverages.json");
    let contents = std::fs::read_to_string(&path)
        .map_err(|_| CliError::MissingInput(path.display().to_string()))?;
    let coverages: Vec<CoverageRef> = serde_json::from_str(&contents)?;
    if coverages.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "{} lists no coverages",
            path.display()
        )));
    }
    Ok(coverages)
}

/// Build the document set from whatever category files are present.
///
/// Missing category files narrow the available set; a directory with no
/// recognized files at all is a missing-input error.
pub fn load_documents(dir: &Path) -> Result<DocumentSet> {
    let mut sources: Vec<Box<dyn DocumentSource>> = Vec::new();
    for category in DocCategory::ALL {
        let path = dir.join(format!("{}.txt", category.as_str()));
        if !path.is_file() {
            continue;
        }
        let text = std::fs::read_to_string(&path)?;
        debug!(category = category.as_str(), path = %path.display(), "loaded document");
        sources.push(Box::new(PagedTextDocument::from_text(category, &text)));
    }
    if sources.is_empty() {
        return Err(CliError::MissingInput(format!(
            "no document text files under {}",
            dir.display()
        )));
    }
    Ok(DocumentSet::new(sources))
}
