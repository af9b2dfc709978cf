//! Row-group and batch planning.
//!
//! Pure, deterministic partitioning: rows are split into contiguous groups
//! of `rows_per_document` (one group per output document), and documents are
//! split into contiguous batches of `batch_size` (one batch per archive).
//! Both planners assume positive sizes; configuration is coerced upstream.

/// Contiguous range of data rows assigned to one document.
///
/// Row indices are 1-based and inclusive, matching the table layout where
/// row 0 is the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowGroup {
    /// First data row in the group (1-based).
    pub start_row: usize,
    /// Last data row in the group (inclusive).
    pub end_row: usize,
}

impl RowGroup {
    /// Number of rows in the group.
    pub fn len(&self) -> usize {
        self.end_row - self.start_row + 1
    }

    /// Whether the group covers no rows. Never true for planner output.
    pub fn is_empty(&self) -> bool {
        self.end_row < self.start_row
    }

    /// Iterate the 1-based row indices of the group.
    pub fn rows(&self) -> std::ops::RangeInclusive<usize> {
        self.start_row..=self.end_row
    }
}

/// Contiguous range of document indices assigned to one archive.
///
/// Document indices are 0-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    /// First document index in the batch (0-based).
    pub start_doc: usize,
    /// Last document index in the batch (inclusive).
    pub end_doc: usize,
}

impl Batch {
    /// Number of documents in the batch.
    pub fn len(&self) -> usize {
        self.end_doc - self.start_doc + 1
    }

    /// Whether the batch covers no documents. Never true for planner output.
    pub fn is_empty(&self) -> bool {
        self.end_doc < self.start_doc
    }

    /// Iterate the 0-based document indices of the batch.
    pub fn docs(&self) -> std::ops::RangeInclusive<usize> {
        self.start_doc..=self.end_doc
    }
}

/// Partition `total_rows` data rows into `ceil(total_rows / rows_per_document)`
/// contiguous groups. The last group may be shorter.
pub fn plan_row_groups(total_rows: usize, rows_per_document: usize) -> Vec<RowGroup> {
    let size = rows_per_document.max(1);
    let mut groups = Vec::with_capacity(total_rows.div_ceil(size));
    let mut start = 1;
    while start <= total_rows {
        let end = (start + size - 1).min(total_rows);
        groups.push(RowGroup {
            start_row: start,
            end_row: end,
        });
        start = end + 1;
    }
    groups
}

/// Partition `total_documents` documents into `ceil(total_documents / batch_size)`
/// contiguous batches. Empty when there are no documents.
pub fn plan_batches(total_documents: usize, batch_size: usize) -> Vec<Batch> {
    let size = batch_size.max(1);
    let mut batches = Vec::with_capacity(total_documents.div_ceil(size));
    let mut start = 0;
    while start < total_documents {
        let end = (start + size - 1).min(total_documents - 1);
        batches.push(Batch {
            start_doc: start,
            end_doc: end,
        });
        start = end + 1;
    }
    batches
}
