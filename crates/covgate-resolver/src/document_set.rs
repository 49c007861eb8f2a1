//! Document set - lazily cached page text for one product's documents

use covgate_domain::{DocCategory, DocumentSource};
use std::cell::OnceCell;

/// A document source with a once-per-run page cache.
///
/// Page text is loaded on first access and kept for the lifetime of the
/// containing [`DocumentSet`]; it is never invalidated or refreshed within
/// a run.
struct CachedDocument {
    source: Box<dyn DocumentSource>,
    pages: Vec<OnceCell<Option<String>>>,
}

impl CachedDocument {
    fn new(source: Box<dyn DocumentSource>) -> Self {
        let pages = (0..source.page_count()).map(|_| OnceCell::new()).collect();
        Self { source, pages }
    }

    fn category(&self) -> DocCategory {
        self.source.category()
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Cached text of a 1-based page
    fn page(&self, page: usize) -> Option<&str> {
        let cell = self.pages.get(page.checked_sub(1)?)?;
        cell.get_or_init(|| self.source.page_text(page)).as_deref()
    }
}

/// The ordered, available documents for one coverage-bearing product.
///
/// Iteration follows the fixed category priority
/// (proposal → product summary → business method → policy terms) with a
/// stable order inside each category.
pub struct DocumentSet {
    docs: Vec<CachedDocument>,
}

impl DocumentSet {
    /// Build a set from whatever sources are available
    pub fn new(sources: Vec<Box<dyn DocumentSource>>) -> Self {
        let mut docs: Vec<CachedDocument> =
            sources.into_iter().map(CachedDocument::new).collect();
        docs.sort_by_key(|doc| doc.category().priority_index());
        Self { docs }
    }

    /// Whether no documents are available
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Number of documents in the set
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Documents in category-priority order
    pub(crate) fn iter(&self) -> impl Iterator<Item = DocumentPages<'_>> {
        self.docs.iter().map(|doc| DocumentPages { doc })
    }
}

/// Read-only view over one cached document's pages
pub(crate) struct DocumentPages<'a> {
    doc: &'a CachedDocument,
}

impl DocumentPages<'_> {
    pub(crate) fn category(&self) -> DocCategory {
        self.doc.category()
    }

    pub(crate) fn page_count(&self) -> usize {
        self.doc.page_count()
    }

    pub(crate) fn page(&self, page: usize) -> Option<&str> {
        self.doc.page(page)
    }
}

// The row locator takes any `DocumentSource`; serving it from the cached
// view keeps page loads at one per run.
impl DocumentSource for DocumentPages<'_> {
    fn category(&self) -> DocCategory {
        self.doc.category()
    }

    fn page_count(&self) -> usize {
        self.doc.page_count()
    }

    fn page_text(&self, page: usize) -> Option<String> {
        self.doc.page(page).map(str::to_string)
    }
}

/// In-memory page-indexed document, the standard `DocumentSource` for
/// pre-extracted text files (pages separated by form-feed) and for tests.
#[derive(Debug, Clone)]
pub struct PagedTextDocument {
    category: DocCategory,
    pages: Vec<String>,
}

impl PagedTextDocument {
    /// Build from explicit pages
    pub fn new(category: DocCategory, pages: Vec<String>) -> Self {
        Self { category, pages }
    }

    /// Split extracted text into pages on form-feed characters
    pub fn from_text(category: DocCategory, text: &str) -> Self {
        Self {
            category,
            pages: text.split('\u{0c}').map(|p| p.to_string()).collect(),
        }
    }
}

impl DocumentSource for PagedTextDocument {
    fn category(&self) -> DocCategory {
        self.category
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, page: usize) -> Option<String> {
        self.pages.get(page.checked_sub(1)?).cloned()
    }
}
