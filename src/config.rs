//! Generation configuration.
//!
//! Invalid values are never rejected: [`GenerationConfig::coerced`] replaces
//! out-of-range inputs with the documented defaults, matching the forgiving
//! behavior users expect from the form-style inputs this tool grew out of.

use serde::{Deserialize, Serialize};

/// Default number of documents packed into one ZIP archive.
pub const DEFAULT_BATCH_SIZE: i64 = 50;
/// Default number of source rows rendered into one document.
pub const DEFAULT_ROWS_PER_DOCUMENT: i64 = 1;
/// Default content lines per page before a forced page break.
pub const DEFAULT_LINES_PER_PAGE: i64 = 30;
/// Minimum usable lines per page; anything at or below this is coerced.
pub const MIN_LINES_PER_PAGE: i64 = 6;
/// Default pause between documents, keeps a host UI responsive.
pub const DEFAULT_DOC_PAUSE_MS: u64 = 30;
/// Default pause between archive batches.
pub const DEFAULT_BATCH_PAUSE_MS: u64 = 200;

/// Configuration for a generation run.
///
/// Fields hold raw, possibly-invalid values (e.g. parsed from user input);
/// call [`coerced`](Self::coerced) before planning to get guaranteed-valid
/// positive values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Documents per ZIP archive when using archive delivery.
    pub batch_size: i64,
    /// Source rows rendered into each document.
    pub rows_per_document: i64,
    /// Content lines per page before a forced page break.
    pub lines_per_page: i64,
    /// Prefer writing documents directly into a chosen folder.
    pub use_folder_delivery: bool,
    /// Cooperative pause between documents, in milliseconds. Zero disables.
    pub doc_pause_ms: u64,
    /// Cooperative pause between archive batches, in milliseconds.
    pub batch_pause_ms: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            rows_per_document: DEFAULT_ROWS_PER_DOCUMENT,
            lines_per_page: DEFAULT_LINES_PER_PAGE,
            use_folder_delivery: false,
            doc_pause_ms: DEFAULT_DOC_PAUSE_MS,
            batch_pause_ms: DEFAULT_BATCH_PAUSE_MS,
        }
    }
}

impl GenerationConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the archive batch size.
    pub fn with_batch_size(mut self, batch_size: i64) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the number of rows per document.
    pub fn with_rows_per_document(mut self, rows: i64) -> Self {
        self.rows_per_document = rows;
        self
    }

    /// Set the number of lines per page.
    pub fn with_lines_per_page(mut self, lines: i64) -> Self {
        self.lines_per_page = lines;
        self
    }

    /// Request direct folder delivery.
    pub fn with_folder_delivery(mut self, enable: bool) -> Self {
        self.use_folder_delivery = enable;
        self
    }

    /// Set both cooperative pauses. Zero disables a pause.
    pub fn with_pauses(mut self, doc_ms: u64, batch_ms: u64) -> Self {
        self.doc_pause_ms = doc_ms;
        self.batch_pause_ms = batch_ms;
        self
    }

    /// Return a copy with every field coerced into its valid range.
    ///
    /// Non-positive `batch_size` and `rows_per_document` fall back to their
    /// defaults; `lines_per_page` must exceed [`MIN_LINES_PER_PAGE`] - 1 or
    /// falls back to [`DEFAULT_LINES_PER_PAGE`].
    pub fn coerced(&self) -> Self {
        let mut c = self.clone();
        if c.batch_size <= 0 {
            c.batch_size = DEFAULT_BATCH_SIZE;
        }
        if c.rows_per_document <= 0 {
            c.rows_per_document = DEFAULT_ROWS_PER_DOCUMENT;
        }
        if c.lines_per_page < MIN_LINES_PER_PAGE {
            c.lines_per_page = DEFAULT_LINES_PER_PAGE;
        }
        c
    }
}
