//! Run orchestration.
//!
//! The controller wires planning, rendering, and delivery together and owns
//! the run lifecycle: validate, go busy, deliver, report, and always leave
//! the host UI re-enabled. Overlapping runs are prevented by the busy gate,
//! not by internal locking.

use crate::config::GenerationConfig;
use crate::delivery::{DeliveryKind, DeliveryPlan, DeliveryRequest, RunSummary};
use crate::error::{Error, Result};
use crate::logo::LogoAsset;
use crate::planner::plan_row_groups;
use crate::progress::{BusyGuard, ProgressSink, UiGate};
use crate::renderer::DocumentRenderer;
use crate::table::Table;

/// Orchestrates one generation run end to end.
#[derive(Debug, Clone, Default)]
pub struct BatchController {
    config: GenerationConfig,
}

impl BatchController {
    /// Create a controller with the given (possibly raw) configuration.
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    /// The configuration this controller runs with.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generate and deliver every planned document.
    ///
    /// Fails with [`Error::NoData`] before any busy transition when the
    /// table has no data rows. On every other path, the busy gate is
    /// released when this returns, success or not.
    pub fn run(
        &self,
        table: &Table,
        logo: Option<&LogoAsset>,
        request: &DeliveryRequest,
        ui: &mut dyn UiGate,
        progress: &mut dyn ProgressSink,
    ) -> Result<RunSummary> {
        let total_rows = table.data_row_count();
        if total_rows == 0 {
            return Err(Error::NoData);
        }

        let config = self.config.coerced();
        let groups = plan_row_groups(total_rows, config.rows_per_document as usize);
        let renderer = DocumentRenderer::new(&config);

        let _busy = BusyGuard::acquire(ui);
        progress.begin("Generating PDF documents...", groups.len());

        let plan = DeliveryPlan::select(&config, request);
        let result = plan.deliver(table, &groups, &renderer, logo, &config, progress);

        // The progress surface is closed on every terminal path, abort
        // included; the busy guard releases the gate when we return.
        match &result {
            Ok(summary) => match summary.delivery {
                DeliveryKind::DirectFolder => {
                    progress.finish(&format!(
                        "Saved {} PDFs into the selected folder",
                        summary.documents
                    ));
                },
                DeliveryKind::ArchiveDownload => {
                    progress.finish(&format!(
                        "Generated {} archive(s) with {} PDFs in total",
                        summary.archives, summary.documents
                    ));
                },
            },
            Err(e) => progress.finish(&format!("Generation aborted: {}", e)),
        }

        result
    }
}
