//! CLI tool for slimming progressive-reveal PPTX and PDF files.
//!
//! For each input file, detects slides/pages whose content is fuzzily
//! contained in the immediately following one and writes a slimmed
//! copy beside the original with a configurable suffix. Files are
//! processed independently; one bad input never aborts the batch.

mod reporter;

use anyhow::{Context, Result};
use clap::Parser;
use deckslim_core::{
    detect_redundant_units, DetectorConfig, Document, DocumentFormat, LineNormalizer,
};
use deckslim_pdf::{PdfReader, PdfReconstructor};
use deckslim_pptx::{PptxReader, PptxReconstructor};
use reporter::{Lang, Reporter};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Remove redundant progressive-reveal slides/pages from PPTX and PDF files.
#[derive(Parser, Debug)]
#[command(name = "deckslim")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file(s) (.pdf or .pptx)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Suffix appended to the output base name before the extension
    #[arg(short, long, default_value = "_slimmer")]
    suffix: String,

    /// Similarity threshold for fuzzy line containment
    #[arg(short, long, default_value_t = 0.9)]
    threshold: f64,

    /// Report language
    #[arg(long, value_enum, default_value_t = Lang::En)]
    lang: Lang,

    /// Detect and report without writing output files
    #[arg(long)]
    dry_run: bool,

    /// Emit one JSON summary line per file instead of text reports
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// What happened to a single input file.
enum FileOutcome {
    /// Not a PDF or PPTX.
    Unsupported,
    /// Zero or one unit; nothing to deduplicate.
    SingleUnit,
    /// Scan found nothing to remove.
    NoRedundancy { original: usize },
    /// Output written.
    Slimmed {
        original: usize,
        retained: usize,
        output: PathBuf,
    },
    /// Dry run: detection only.
    DryRun {
        original: usize,
        would_retain: usize,
    },
}

/// Machine-readable per-file summary for `--json`.
#[derive(Serialize)]
struct FileSummary<'a> {
    file: String,
    status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    original_units: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retained_units: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let reporter = Reporter::new(args.lang);
    let config = DetectorConfig::new().with_similarity_threshold(args.threshold);

    if !args.json {
        reporter.init();
    }

    for input_path in &args.input {
        if !input_path.exists() {
            log::warn!("skipping missing file: {}", input_path.display());
            continue;
        }

        if !args.json {
            reporter.processing(input_path);
            reporter.analyzing();
        }

        let result = process_file(input_path, &args, &config);

        if args.json {
            print_json_summary(input_path, &result);
        } else {
            match &result {
                Ok(FileOutcome::Unsupported) => reporter.skip_unsupported(),
                Ok(FileOutcome::SingleUnit) => reporter.single_unit(),
                Ok(FileOutcome::NoRedundancy { .. }) => reporter.no_redundancy(),
                Ok(FileOutcome::Slimmed {
                    original,
                    retained,
                    output,
                }) => reporter.success(*original, *retained, output),
                Ok(FileOutcome::DryRun {
                    original,
                    would_retain,
                }) => reporter.dry_run(*original, *would_retain),
                Err(e) => reporter.failure(e),
            }
        }
    }

    if !args.json {
        reporter.all_done();
    }

    Ok(())
}

/// Process a single input file in isolation.
fn process_file(input_path: &Path, args: &Args, config: &DetectorConfig) -> Result<FileOutcome> {
    let Some(format) = detect_format(input_path)? else {
        return Ok(FileOutcome::Unsupported);
    };

    let unit_texts = match format {
        DocumentFormat::Pdf => {
            log::debug!("reading as PDF");
            PdfReader::new()
                .read_unit_texts(input_path)
                .with_context(|| format!("failed to read {}", input_path.display()))?
        }
        DocumentFormat::Pptx => {
            log::debug!("reading as PPTX");
            PptxReader::new()
                .read_unit_texts(input_path)
                .with_context(|| format!("failed to read {}", input_path.display()))?
        }
    };

    if unit_texts.len() <= 1 {
        return Ok(FileOutcome::SingleUnit);
    }

    let normalizer = LineNormalizer::new();
    let document = Document::from_raw_texts(unit_texts, &normalizer);
    let decision = detect_redundant_units(&document, config);

    if decision.is_empty() {
        return Ok(FileOutcome::NoRedundancy {
            original: document.len(),
        });
    }

    // Cannot occur since the last unit is never marked, but a decision
    // spanning every unit must not produce an empty output
    if decision.is_degenerate(document.len()) {
        log::warn!(
            "{}: decision would remove every unit, passing file through",
            input_path.display()
        );
        return Ok(FileOutcome::NoRedundancy {
            original: document.len(),
        });
    }

    let original = document.len();
    let retained = original - decision.len();

    if args.dry_run {
        return Ok(FileOutcome::DryRun {
            original,
            would_retain: retained,
        });
    }

    let output = output_path(input_path, &args.suffix);
    match format {
        DocumentFormat::Pdf => PdfReconstructor::new()
            .write_slimmed(input_path, &output, &decision)
            .with_context(|| format!("failed to write {}", output.display()))?,
        DocumentFormat::Pptx => PptxReconstructor::new()
            .write_slimmed(input_path, &output, &decision)
            .with_context(|| format!("failed to write {}", output.display()))?,
    }

    Ok(FileOutcome::Slimmed {
        original,
        retained,
        output,
    })
}

/// Detect the input format from magic bytes, falling back to the file
/// extension. Format dispatch happens here once, never inside the
/// detection algorithm.
fn detect_format(input_path: &Path) -> Result<Option<DocumentFormat>> {
    let mut file = File::open(input_path)
        .with_context(|| format!("failed to open {}", input_path.display()))?;

    let mut magic = [0u8; 8];
    let read = file.read(&mut magic).context("failed to read file header")?;

    Ok(DocumentFormat::from_magic(&magic[..read]).or_else(|| {
        input_path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(DocumentFormat::from_extension)
    }))
}

/// Output path beside the original: base name + suffix + extension.
fn output_path(input_path: &Path, suffix: &str) -> PathBuf {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let name = match input_path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext),
        None => format!("{}{}", stem, suffix),
    };

    input_path.with_file_name(name)
}

/// Print one JSON summary line for a processed file.
fn print_json_summary(input_path: &Path, result: &Result<FileOutcome>) {
    let file = input_path.display().to_string();
    let summary = match result {
        Ok(FileOutcome::Unsupported) => FileSummary {
            file,
            status: "unsupported",
            original_units: None,
            retained_units: None,
            output: None,
            error: None,
        },
        Ok(FileOutcome::SingleUnit) => FileSummary {
            file,
            status: "single_unit",
            original_units: None,
            retained_units: None,
            output: None,
            error: None,
        },
        Ok(FileOutcome::NoRedundancy { original }) => FileSummary {
            file,
            status: "no_redundancy",
            original_units: Some(*original),
            retained_units: Some(*original),
            output: None,
            error: None,
        },
        Ok(FileOutcome::Slimmed {
            original,
            retained,
            output,
        }) => FileSummary {
            file,
            status: "slimmed",
            original_units: Some(*original),
            retained_units: Some(*retained),
            output: Some(output.display().to_string()),
            error: None,
        },
        Ok(FileOutcome::DryRun {
            original,
            would_retain,
        }) => FileSummary {
            file,
            status: "dry_run",
            original_units: Some(*original),
            retained_units: Some(*would_retain),
            output: None,
            error: None,
        },
        Err(e) => FileSummary {
            file,
            status: "error",
            original_units: None,
            retained_units: None,
            output: None,
            error: Some(format!("{:#}", e)),
        },
    };

    match serde_json::to_string(&summary) {
        Ok(line) => println!("{}", line),
        Err(e) => log::error!("failed to serialize summary: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_with_extension() {
        let path = output_path(Path::new("/tmp/deck.pptx"), "_slimmer");
        assert_eq!(path, PathBuf::from("/tmp/deck_slimmer.pptx"));
    }

    #[test]
    fn test_output_path_without_extension() {
        let path = output_path(Path::new("/tmp/deck"), "_slimmer");
        assert_eq!(path, PathBuf::from("/tmp/deck_slimmer"));
    }

    #[test]
    fn test_output_path_custom_suffix() {
        let path = output_path(Path::new("notes.pdf"), "-min");
        assert_eq!(path, PathBuf::from("notes-min.pdf"));
    }
}
