//! Delivery strategies.
//!
//! Two mutually exclusive ways to hand generated documents to the user:
//! writing each PDF into a chosen folder, or packing batches of PDFs into
//! ZIP archives in an output directory. Folder delivery is attempted only
//! when requested and the folder probe succeeds; any setup failure falls
//! back to archive delivery for the whole run. A write failure mid-run
//! aborts instead, since files may already exist in the folder.

use crate::config::GenerationConfig;
use crate::error::{Error, Result};
use crate::logo::LogoAsset;
use crate::planner::{plan_batches, RowGroup};
use crate::progress::ProgressSink;
use crate::renderer::{document_filename, DocumentRenderer};
use crate::table::Table;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Deflate level used for archives.
const ARCHIVE_COMPRESSION_LEVEL: i64 = 6;

/// Which delivery mechanism a run ended up using.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryKind {
    /// Documents written individually into a folder.
    DirectFolder,
    /// Documents packed into downloadable ZIP archives.
    ArchiveDownload,
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Documents generated.
    pub documents: usize,
    /// Archives written (zero for direct delivery).
    pub archives: usize,
    /// Mechanism that was used.
    pub delivery: DeliveryKind,
}

/// Delivery targets supplied by the caller.
#[derive(Debug, Clone)]
pub struct DeliveryRequest {
    /// Folder for direct delivery, when the user granted one.
    pub folder: Option<PathBuf>,
    /// Directory receiving ZIP archives in the fallback path.
    pub archive_dir: PathBuf,
}

/// The strategy selected for one whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryPlan {
    /// Write every document into this folder.
    DirectFolder(PathBuf),
    /// Write batch archives into this directory.
    ArchiveDownload(PathBuf),
}

impl DeliveryPlan {
    /// Pick the strategy for a run.
    ///
    /// Direct folder delivery requires both the configuration flag and a
    /// usable folder; a missing folder or failed probe logs a warning and
    /// silently falls back to archive delivery.
    pub fn select(config: &GenerationConfig, request: &DeliveryRequest) -> Self {
        if config.use_folder_delivery {
            match &request.folder {
                Some(dir) => match probe_folder(dir) {
                    Ok(()) => return DeliveryPlan::DirectFolder(dir.clone()),
                    Err(e) => {
                        log::warn!(
                            "Folder delivery unavailable ({}), falling back to archive download",
                            e
                        );
                    },
                },
                None => {
                    log::warn!(
                        "Folder delivery requested but no folder was granted, falling back to archive download"
                    );
                },
            }
        }
        DeliveryPlan::ArchiveDownload(request.archive_dir.clone())
    }

    /// The mechanism this plan uses.
    pub fn kind(&self) -> DeliveryKind {
        match self {
            DeliveryPlan::DirectFolder(_) => DeliveryKind::DirectFolder,
            DeliveryPlan::ArchiveDownload(_) => DeliveryKind::ArchiveDownload,
        }
    }

    /// Execute the plan over all planned documents, in ascending order.
    pub fn deliver(
        &self,
        table: &Table,
        groups: &[RowGroup],
        renderer: &DocumentRenderer,
        logo: Option<&LogoAsset>,
        config: &GenerationConfig,
        progress: &mut dyn ProgressSink,
    ) -> Result<RunSummary> {
        match self {
            DeliveryPlan::DirectFolder(dir) => {
                deliver_direct(dir, table, groups, renderer, logo, config, progress)
            },
            DeliveryPlan::ArchiveDownload(dir) => {
                deliver_archive(dir, table, groups, renderer, logo, config, progress)
            },
        }
    }
}

/// Check that a directory can be created and written to.
fn probe_folder(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let probe = dir.join(".rowpdf_write_probe");
    std::fs::write(&probe, b"")?;
    std::fs::remove_file(&probe)
}

fn pause(ms: u64) {
    if ms > 0 {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Write each rendered document straight into `dir`.
///
/// Existing files with the same name are replaced. Any write failure aborts
/// the run with [`Error::Delivery`].
fn deliver_direct(
    dir: &Path,
    table: &Table,
    groups: &[RowGroup],
    renderer: &DocumentRenderer,
    logo: Option<&LogoAsset>,
    config: &GenerationConfig,
    progress: &mut dyn ProgressSink,
) -> Result<RunSummary> {
    let total = groups.len();
    let mut saved = 0;

    for group in groups {
        let bytes = renderer.render(table, group, logo)?;
        let filename = document_filename(table, group);
        let path = dir.join(&filename);
        std::fs::write(&path, &bytes)
            .map_err(|e| Error::Delivery(format!("Failed to write {}: {}", path.display(), e)))?;
        log::debug!("Wrote {}", path.display());

        saved += 1;
        progress.update(saved, total);
        pause(config.doc_pause_ms);
    }

    Ok(RunSummary {
        documents: saved,
        archives: 0,
        delivery: DeliveryKind::DirectFolder,
    })
}

/// Render documents batch by batch into deflate-compressed ZIP archives.
///
/// Archives land in `dir` as
/// `pdfs_por_fila_batch_{n}_of_{total}.zip`. Any compression or write
/// failure aborts the remaining batches.
fn deliver_archive(
    dir: &Path,
    table: &Table,
    groups: &[RowGroup],
    renderer: &DocumentRenderer,
    logo: Option<&LogoAsset>,
    config: &GenerationConfig,
    progress: &mut dyn ProgressSink,
) -> Result<RunSummary> {
    std::fs::create_dir_all(dir)?;

    let total = groups.len();
    let batches = plan_batches(total, config.batch_size as usize);
    let total_batches = batches.len();
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(ARCHIVE_COMPRESSION_LEVEL));

    let mut done = 0;

    for (b, batch) in batches.iter().enumerate() {
        progress.status(&format!(
            "Generating batch {} of {} (documents {}..{})",
            b + 1,
            total_batches,
            batch.start_doc + 1,
            batch.end_doc + 1
        ));

        let mut archive = ZipWriter::new(Cursor::new(Vec::new()));

        for doc in batch.docs() {
            let group = &groups[doc];
            let bytes = renderer.render(table, group, logo)?;
            let filename = document_filename(table, group);
            archive.start_file(filename, options)?;
            archive.write_all(&bytes)?;

            done += 1;
            progress.update(done, total);
            pause(config.doc_pause_ms);
        }

        progress.status(&format!("Compressing batch {} of {}...", b + 1, total_batches));
        let cursor = archive.finish()?;
        let name = format!("pdfs_por_fila_batch_{}_of_{}.zip", b + 1, total_batches);
        std::fs::write(dir.join(&name), cursor.into_inner())?;
        log::debug!("Wrote archive {}", name);

        pause(config.batch_pause_ms);
    }

    Ok(RunSummary {
        documents: done,
        archives: total_batches,
        delivery: DeliveryKind::ArchiveDownload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_archive_when_folder_not_requested() {
        let config = GenerationConfig::default();
        let request = DeliveryRequest {
            folder: None,
            archive_dir: PathBuf::from("out"),
        };
        let plan = DeliveryPlan::select(&config, &request);
        assert_eq!(plan, DeliveryPlan::ArchiveDownload(PathBuf::from("out")));
    }

    #[test]
    fn test_select_falls_back_without_granted_folder() {
        let config = GenerationConfig::new().with_folder_delivery(true);
        let request = DeliveryRequest {
            folder: None,
            archive_dir: PathBuf::from("out"),
        };
        let plan = DeliveryPlan::select(&config, &request);
        assert_eq!(plan.kind(), DeliveryKind::ArchiveDownload);
    }
}
