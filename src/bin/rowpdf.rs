//! Command-line front end for the batch generator.
//!
//! Loads a spreadsheet, optionally a logo image and a JSON config file,
//! then runs the controller with an indicatif progress bar.

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rowpdf::{
    BatchController, DeliveryRequest, GenerationConfig, LogoAsset, ProgressSink, Table, UiGate,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rowpdf", version, about = "Generate one PDF per spreadsheet row (or row group)")]
struct Args {
    /// Spreadsheet to read (xlsx, xls, ods or csv); row 1 must be headers.
    input: PathBuf,

    /// Logo image (PNG or JPEG) stamped top-right on every document.
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Documents per ZIP archive [default: 50].
    #[arg(long)]
    batch_size: Option<i64>,

    /// Rows rendered into each document [default: 1].
    #[arg(long)]
    rows_per_document: Option<i64>,

    /// Content lines per page before a page break [default: 30].
    #[arg(long)]
    lines_per_page: Option<i64>,

    /// Write documents directly into --folder instead of ZIP archives.
    #[arg(long)]
    use_folder: bool,

    /// Target folder for direct delivery.
    #[arg(long)]
    folder: Option<PathBuf>,

    /// Output directory for ZIP archives.
    #[arg(long, default_value = "out")]
    out_dir: PathBuf,

    /// JSON config file; command-line flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the first N parsed rows and exit.
    #[arg(long, value_name = "N")]
    preview: Option<usize>,
}

/// indicatif-backed progress sink.
struct BarProgress {
    bar: Option<ProgressBar>,
}

impl BarProgress {
    fn new() -> Self {
        Self { bar: None }
    }
}

impl ProgressSink for BarProgress {
    fn begin(&mut self, label: &str, total: usize) {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(ProgressStyle::default_bar());
        bar.set_message(label.to_string());
        self.bar = Some(bar);
    }

    fn update(&mut self, done: usize, _total: usize) {
        if let Some(bar) = &self.bar {
            bar.set_position(done as u64);
        }
    }

    fn status(&mut self, label: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(label.to_string());
        }
    }

    fn finish(&mut self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
        println!("{}", message);
    }
}

/// The CLI has no persistent inputs to disable; busy transitions are only
/// logged.
struct CliGate;

impl UiGate for CliGate {
    fn set_busy(&mut self, busy: bool) {
        log::debug!("busy = {}", busy);
    }
}

fn build_config(args: &Args) -> rowpdf::Result<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str(&text)
                .map_err(|e| rowpdf::Error::Table(format!("Invalid config file: {}", e)))?
        },
        None => GenerationConfig::default(),
    };
    // Only flags actually passed override the config file.
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(rows_per_document) = args.rows_per_document {
        config.rows_per_document = rows_per_document;
    }
    if let Some(lines_per_page) = args.lines_per_page {
        config.lines_per_page = lines_per_page;
    }
    if args.use_folder {
        config.use_folder_delivery = true;
    }
    Ok(config)
}

fn print_preview(table: &Table, rows: usize) {
    let headers = table.headers();
    println!("{}", headers.join(" | "));
    for r in 1..=table.data_row_count().min(rows) {
        let cells: Vec<&str> = (0..table.column_span(r)).map(|c| table.value(r, c)).collect();
        println!("{}", cells.join(" | "));
    }
    println!("({} data rows total)", table.data_row_count());
}

fn run(args: &Args) -> rowpdf::Result<()> {
    let table = Table::load(&args.input)?;

    if let Some(rows) = args.preview {
        print_preview(&table, rows);
        return Ok(());
    }

    let logo = match &args.logo {
        Some(path) => match LogoAsset::from_file(path) {
            Ok(asset) => Some(asset),
            Err(e) => {
                log::warn!("Ignoring logo {}: {}", path.display(), e);
                None
            },
        },
        None => None,
    };

    let config = build_config(args)?;
    let request = DeliveryRequest {
        folder: args.folder.clone(),
        archive_dir: args.out_dir.clone(),
    };

    let controller = BatchController::new(config);
    let summary = controller.run(
        &table,
        logo.as_ref(),
        &request,
        &mut CliGate,
        &mut BarProgress::new(),
    )?;
    log::info!(
        "Run complete: {} documents, {} archive(s)",
        summary.documents,
        summary.archives
    );
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
