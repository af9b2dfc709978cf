//! Error types for the batch generator.
//!
//! This module defines all error types that can occur during table loading,
//! document rendering, and delivery.

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while generating or delivering documents.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The loaded table has no data rows beyond the header.
    #[error("No data rows to generate documents from")]
    NoData,

    /// Failed to load or parse the source table.
    #[error("Table error: {0}")]
    Table(String),

    /// Logo image could not be decoded or embedded.
    #[error("Image error: {0}")]
    Image(String),

    /// A document could not be written to the target folder.
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// Archive compression failed; the run is aborted.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// PDF serialization error from the page-construction layer.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
