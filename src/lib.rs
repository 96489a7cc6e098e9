//! Per-second video emotion scores: reshape the recognition tool's wide
//! export into a tidy table and weight it with a power-law decay so early
//! moments count more than late ones.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod state;

pub use config::AnalysisConfig;
pub use data::model::{CellValue, Emotion, RawTable, TidyTable, WeightedTable};
pub use data::normalize::{normalize, normalize_translated};
pub use data::weighting::{apply_weighting, PowerLaw};
pub use error::{FormatError, IoError, PipelineError};
pub use state::{AnalysisSession, SessionStatus};
