use std::path::{Path, PathBuf};

use crate::config::AnalysisConfig;
use crate::data::export::{write_table, ExportFormat};
use crate::data::loader::load_file;
use crate::data::model::{RawTable, TidyTable, WeightedTable};
use crate::data::normalize::normalize_with;
use crate::data::view::{PlotTables, PositiveNeutral, WeightCurve};
use crate::data::weighting::apply_weighting;
use crate::error::{FormatError, IoError, PipelineError};

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// Nothing processed yet.
    #[default]
    Empty,
    /// The last "process" action succeeded.
    Ready,
    /// The last "process" action failed; earlier tables (if any) are kept.
    Failed,
}

/// Holds the two most recent analysis tables, independent of any front end.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    pub config: AnalysisConfig,

    tidy: Option<TidyTable>,
    weighted: Option<WeightedTable>,

    pub status: SessionStatus,

    /// User-facing outcome of the last action.
    pub status_message: Option<String>,
}

impl AnalysisSession {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn tidy(&self) -> Option<&TidyTable> {
        self.tidy.as_ref()
    }

    pub fn weighted(&self) -> Option<&WeightedTable> {
        self.weighted.as_ref()
    }

    /// Normalize and weight a raw table, replacing both stored tables on
    /// success. On failure the previous tables stay in place.
    pub fn process(&mut self, raw: &RawTable) -> Result<(), FormatError> {
        match self.run(raw) {
            Ok((tidy, weighted)) => {
                let message = format!(
                    "{} segundos, {} emociones",
                    tidy.len(),
                    tidy.series.len()
                );
                log::info!("{message}");
                self.tidy = Some(tidy);
                self.weighted = Some(weighted);
                self.status = SessionStatus::Ready;
                self.status_message = Some(message);
                Ok(())
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// Load `path` and [`process`](Self::process) it.
    pub fn process_file(&mut self, path: &Path) -> Result<(), PipelineError> {
        let raw = match load_file(path) {
            Ok(raw) => raw,
            Err(e) => {
                self.fail(&e);
                return Err(e.into());
            }
        };
        self.process(&raw)?;
        Ok(())
    }

    fn run(&self, raw: &RawTable) -> Result<(TidyTable, WeightedTable), FormatError> {
        let tidy = normalize_with(raw, self.config.naming())?;
        let weighted = apply_weighting(&tidy, self.config.scale, self.config.exponent);
        Ok((tidy, weighted))
    }

    fn fail(&mut self, err: &dyn std::error::Error) {
        log::error!("Processing failed: {err}");
        self.status = SessionStatus::Failed;
        self.status_message = Some(format!("Error: {err}"));
    }

    // -- Views for plotting / export collaborators --

    /// Stored tables with the drop-last-second flag applied.
    pub fn plot_tables(&self) -> Option<PlotTables> {
        let (tidy, weighted) = (self.tidy.as_ref()?, self.weighted.as_ref()?);
        Some(PlotTables::new(tidy, weighted, self.config.drop_last_second))
    }

    pub fn positive_vs_neutral(&self) -> Option<PositiveNeutral> {
        self.weighted
            .as_ref()
            .map(|w| PositiveNeutral::from_weighted(w, self.config.drop_last_second))
    }

    /// Curve computed with the current parameters over the stored seconds.
    pub fn weight_curve(&self) -> Option<WeightCurve> {
        self.tidy
            .as_ref()
            .map(|t| WeightCurve::new(t, self.config.power_law()))
    }

    /// Write every artifact into `dir`, named after `stem`. Returns the
    /// paths written, tidy and weighted tables first.
    pub fn export_all(
        &self,
        dir: &Path,
        stem: &str,
        format: ExportFormat,
    ) -> Result<Vec<PathBuf>, IoError> {
        let (Some(tidy), Some(weighted), Some(aggregate), Some(curve)) = (
            self.tidy.as_ref(),
            self.weighted.as_ref(),
            self.positive_vs_neutral(),
            self.weight_curve(),
        ) else {
            return Err(IoError::NothingToExport);
        };

        let ext = format.extension();
        let path = |suffix: &str| dir.join(format!("{stem}_{suffix}.{ext}"));
        let written = vec![
            path("original"),
            path("ponderado"),
            path("positivo_vs_neutral"),
            path("curva_pesos"),
        ];

        write_table(tidy, &written[0], format)?;
        write_table(weighted, &written[1], format)?;
        write_table(&aggregate, &written[2], format)?;
        write_table(&curve, &written[3], format)?;

        log::info!("Export complete: {} files in {}", written.len(), dir.display());
        Ok(written)
    }
}
