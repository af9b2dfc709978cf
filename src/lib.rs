//! # rowpdf
//!
//! Batch PDF generator: turns spreadsheet rows into one PDF document per
//! row (or per configurable row group), optionally stamping a logo, and
//! delivers the output either as individual files written into a chosen
//! folder or as batched ZIP archives.
//!
//! ## Pipeline
//!
//! - [`Table`] holds the parsed spreadsheet (calamine / csv backed).
//! - [`plan_row_groups`] / [`plan_batches`] partition rows into documents
//!   and documents into archive batches.
//! - [`DocumentRenderer`] paginates one row group into a fixed-layout PDF,
//!   re-embedding the optional [`LogoAsset`] into every document.
//! - [`DeliveryPlan`] picks direct-folder or archive delivery, with a
//!   silent fallback to archives when the folder is unavailable.
//! - [`BatchController`] orchestrates a whole run and guarantees the busy
//!   gate is released on every exit path.
//!
//! ## Quick start
//!
//! ```no_run
//! use rowpdf::{BatchController, DeliveryRequest, GenerationConfig, NullGate, NullProgress, Table};
//!
//! # fn main() -> rowpdf::Result<()> {
//! let table = Table::load("contacts.xlsx")?;
//! let controller = BatchController::new(GenerationConfig::default());
//! let request = DeliveryRequest {
//!     folder: None,
//!     archive_dir: "out".into(),
//! };
//! let summary = controller.run(&table, None, &request, &mut NullGate, &mut NullProgress)?;
//! println!("{} documents in {} archive(s)", summary.documents, summary.archives);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod delivery;
pub mod error;
pub mod logo;
pub mod planner;
pub mod progress;
pub mod renderer;
pub mod table;
pub mod writer;

pub use config::GenerationConfig;
pub use controller::BatchController;
pub use delivery::{DeliveryKind, DeliveryPlan, DeliveryRequest, RunSummary};
pub use error::{Error, Result};
pub use logo::{LogoAsset, LogoFormat};
pub use planner::{plan_batches, plan_row_groups, Batch, RowGroup};
pub use progress::{percent, BusyGuard, LogProgress, NullGate, NullProgress, ProgressSink, UiGate};
pub use renderer::{document_filename, sanitize_filename, DocumentRenderer, PageLayout};
pub use table::Table;
pub use writer::{DocBuilder, EmbeddedImage};
