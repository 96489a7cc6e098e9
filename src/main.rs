use std::path::Path;

use anyhow::{Context, Result};
use arrow::util::pretty::pretty_format_batches;
use clap::Parser;

use emotion_analyzer::cli::Args;
use emotion_analyzer::data::export::to_record_batch;
use emotion_analyzer::{AnalysisConfig, AnalysisSession};

const PREVIEW_ROWS: usize = 10;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {e:#}");
            1
        }
    });
}

fn run() -> Result<()> {
    let args = Args::parse();

    let base = match &args.config {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };
    let config = args.apply_overrides(base);
    log::debug!("Using {config:?}");

    let mut session = AnalysisSession::new(config);
    session
        .process_file(&args.input)
        .with_context(|| format!("processing {}", args.input.display()))?;

    if let Some(msg) = &session.status_message {
        println!("{msg}");
    }

    if args.preview {
        print_preview(&session)?;
    }

    if let Some(dir) = &args.out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
        let stem = file_stem(&args.input);
        for path in session.export_all(dir, &stem, args.format.into())? {
            println!("Exported: {}", path.display());
        }
    }

    Ok(())
}

fn print_preview(session: &AnalysisSession) -> Result<()> {
    let Some(plot) = session.plot_tables() else {
        return Ok(());
    };
    let rows = PREVIEW_ROWS.min(plot.tidy.len());
    let head: Vec<usize> = (0..rows).collect();

    let tidy = to_record_batch(&plot.tidy.select_rows(&head))?;
    let weighted = to_record_batch(&plot.weighted.select_rows(&head))?;
    println!("{}", pretty_format_batches(&[tidy])?);
    println!("{}", pretty_format_batches(&[weighted])?);

    if let Some(curve) = session.weight_curve() {
        println!("{}", curve.label());
    }
    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("emotions")
        .to_string()
}
