//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::AnalysisConfig;
use crate::data::export::ExportFormat;

#[derive(Parser, Debug)]
#[command(
    name = "emotion-analyzer",
    about = "Reshape per-second emotion scores and apply power-law temporal weighting",
    after_help = "\
EXAMPLES:
    emotion-analyzer clip.xlsx                          Summary with default weighting
    emotion-analyzer clip.xlsx -a 1 -b -0.5 --preview   Custom curve, print tables
    emotion-analyzer clip.xlsx --out-dir out --format parquet"
)]
pub struct Args {
    /// Spreadsheet exported by the recognition tool (.xlsx, .xls, .ods, .csv)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// JSON file with analysis parameters (flags override it)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Scale `a` of the weighting curve a · t^b
    #[arg(short = 'a', long, allow_negative_numbers = true)]
    pub scale: Option<f64>,

    /// Exponent `b` of the weighting curve a · t^b
    #[arg(short = 'b', long, allow_negative_numbers = true)]
    pub exponent: Option<f64>,

    /// Leave the last second out of the aggregate view
    #[arg(long)]
    pub drop_last_second: bool,

    /// Keep the tool's English emotion identifiers as column names
    #[arg(long)]
    pub no_translate: bool,

    /// Export all tables into this directory
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Format of exported tables
    #[arg(short, long, value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,

    /// Print the first rows of the tidy and weighted tables
    #[arg(long)]
    pub preview: bool,
}

/// `--format` values.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Csv,
    Parquet,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Parquet => ExportFormat::Parquet,
        }
    }
}

impl Args {
    /// Apply command-line overrides on top of a base configuration.
    pub fn apply_overrides(&self, mut config: AnalysisConfig) -> AnalysisConfig {
        if let Some(a) = self.scale {
            config.scale = a;
        }
        if let Some(b) = self.exponent {
            config.exponent = b;
        }
        if self.drop_last_second {
            config.drop_last_second = true;
        }
        if self.no_translate {
            config.translate = false;
        }
        config
    }
}
