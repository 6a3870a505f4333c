use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use acordex_core::{AcordexError, ExtractionRecord, Extractor};
use acordex_eval::{
    compare_extractions, evaluate, format_batch_summary, format_comparison, format_report,
    MetricsReport,
};
use acordex_extract::{FileExtractor, GroundTruthStore};

/// Validate ACORD form extraction output against ground truth.
#[derive(Parser, Debug)]
#[command(name = "acordex", version)]
struct Cli {
    /// Directory holding ground-truth JSON files
    #[arg(long, default_value = "ground_truth", global = true)]
    ground_truth_dir: PathBuf,

    /// Directory holding extraction sidecar files; defaults to each
    /// document's own directory
    #[arg(long, global = true)]
    extraction_dir: Option<PathBuf>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate one document's extraction against its ground truth
    Validate {
        document: PathBuf,

        /// Explicit ground-truth file; defaults to the store entry for the
        /// document
        #[arg(long)]
        ground_truth: Option<PathBuf>,

        /// Print the raw metrics report as JSON instead of formatted text
        #[arg(long)]
        json: bool,

        /// Hide the field-by-field breakdown
        #[arg(long)]
        summary_only: bool,
    },

    /// Validate every document that has a ground-truth entry
    ValidateAll {
        /// Directory holding the source documents
        #[arg(long, default_value = "samples")]
        samples_dir: PathBuf,
    },

    /// Measure agreement between the extractions of two documents
    Compare {
        document_a: PathBuf,
        document_b: PathBuf,
    },

    /// Promote a document's extraction to a ground-truth file
    CreateGroundTruth {
        document: PathBuf,

        /// Replace an existing ground-truth file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if let Err(err) = run(cli).await {
        error!("{err}");
        std::process::exit(1);
    }
}

fn init_tracing(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), AcordexError> {
    let extractor = match &cli.extraction_dir {
        Some(dir) => FileExtractor::new().with_extraction_dir(dir),
        None => FileExtractor::new(),
    };
    let store = GroundTruthStore::new(&cli.ground_truth_dir);

    match cli.command {
        Command::Validate {
            document,
            ground_truth,
            json,
            summary_only,
        } => {
            let report = validate_document(&extractor, &store, &document, ground_truth.as_deref())
                .await?;
            if json {
                let text = serde_json::to_string_pretty(&report)
                    .map_err(|e| AcordexError::Parsing(e.to_string()))?;
                println!("{text}");
            } else {
                print!("{}", format_report(&report, !summary_only));
            }
            Ok(())
        }

        Command::ValidateAll { samples_dir } => validate_all(&extractor, &store, &samples_dir).await,

        Command::Compare {
            document_a,
            document_b,
        } => {
            let extraction_a = extractor.extract(&document_a).await?;
            let extraction_b = extractor.extract(&document_b).await?;

            let comparison = compare_extractions(
                &extraction_a,
                &extraction_b,
                &display_name(&document_a),
                &display_name(&document_b),
            )?;
            print!("{}", format_comparison(&comparison));
            Ok(())
        }

        Command::CreateGroundTruth { document, force } => {
            let extracted = extractor.extract(&document).await?;
            // only schema-shaped records may become ground truth
            let record = ExtractionRecord::from_value(&extracted)?;
            let value = record.to_value()?;

            let text = serde_json::to_string_pretty(&value)
                .map_err(|e| AcordexError::Parsing(e.to_string()))?;
            println!("{text}");

            let path = store.save(&document, &value, force).await?;
            println!("Ground truth saved to: {}", path.display());
            println!(
                "Validate it with: acordex validate {}",
                document.display()
            );
            Ok(())
        }
    }
}

async fn validate_document(
    extractor: &FileExtractor,
    store: &GroundTruthStore,
    document: &Path,
    ground_truth: Option<&Path>,
) -> Result<MetricsReport, AcordexError> {
    info!(document = %document.display(), "validating extraction");

    let extracted = extractor.extract(document).await?;
    let truth = match ground_truth {
        Some(path) => read_json(path).await?,
        None => store.load(document).await?,
    };

    evaluate(&extracted, &truth)
}

async fn validate_all(
    extractor: &FileExtractor,
    store: &GroundTruthStore,
    samples_dir: &Path,
) -> Result<(), AcordexError> {
    let ground_truth_files = store.list().await?;
    info!(files = ground_truth_files.len(), "running batch validation");

    let mut results = Vec::new();
    for truth_path in ground_truth_files {
        let Some(stem) = truth_path.file_stem() else {
            continue;
        };
        let document = samples_dir.join(stem).with_extension("pdf");

        match validate_document(extractor, store, &document, None).await {
            Ok(report) => {
                print!("{}", format_report(&report, true));
                results.push((display_name(&document), report));
            }
            Err(err) => {
                warn!(document = %document.display(), "skipping: {err}");
            }
        }
    }

    print!("{}", format_batch_summary(&results));
    Ok(())
}

async fn read_json(path: &Path) -> Result<Value, AcordexError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AcordexError::GroundTruth(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&json)
        .map_err(|e| AcordexError::Parsing(format!("invalid JSON in {}: {e}", path.display())))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
