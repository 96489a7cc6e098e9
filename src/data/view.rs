use super::model::{Emotion, Tabular, TidyTable, WeightedTable};
use super::weighting::PowerLaw;

// ---------------------------------------------------------------------------
// Row selection at the presentation boundary
// ---------------------------------------------------------------------------

/// Indices of the rows shown to collaborators.
///
/// * `drop_last_second == false` → every row
/// * otherwise → rows whose second is strictly below the maximum, which
///   removes the trailing partial second (all rows sharing it)
pub fn retained_rows(seconds: &[i16], drop_last_second: bool) -> Vec<usize> {
    let max = match seconds.iter().max() {
        Some(&max) if drop_last_second => max,
        _ => return (0..seconds.len()).collect(),
    };
    seconds
        .iter()
        .enumerate()
        .filter(|&(_, &s)| s < max)
        .map(|(i, _)| i)
        .collect()
}

/// Tidy and weighted tables as they should be plotted or exported.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotTables {
    pub tidy: TidyTable,
    pub weighted: WeightedTable,
}

impl PlotTables {
    pub fn new(tidy: &TidyTable, weighted: &WeightedTable, drop_last_second: bool) -> Self {
        let rows = retained_rows(&tidy.seconds, drop_last_second);
        PlotTables {
            tidy: tidy.select_rows(&rows),
            weighted: weighted.select_rows(&rows),
        }
    }
}

// ---------------------------------------------------------------------------
// Positive vs neutral aggregate
// ---------------------------------------------------------------------------

pub const POSITIVE_COLUMN: &str = "positivo";
pub const NEUTRAL_COLUMN: &str = "neutral";

/// Weighted positive series against the row-wise sum of every other
/// weighted series.
#[derive(Debug, Clone, PartialEq)]
pub struct PositiveNeutral {
    pub seconds: Vec<i16>,
    pub positive: Vec<f64>,
    pub neutral: Vec<f64>,
}

impl PositiveNeutral {
    /// Missing positive or neutral series contribute zeros.
    pub fn from_weighted(weighted: &WeightedTable, drop_last_second: bool) -> Self {
        let rows = retained_rows(&weighted.seconds, drop_last_second);

        let positive = match weighted.series_for(Emotion::POSITIVE) {
            Some(series) => rows.iter().map(|&i| series.values[i]).collect(),
            None => vec![0.0; rows.len()],
        };

        let mut neutral = vec![0.0; rows.len()];
        for series in weighted
            .series
            .iter()
            .filter(|s| s.emotion != Emotion::POSITIVE)
        {
            for (acc, &i) in neutral.iter_mut().zip(&rows) {
                *acc += series.values[i];
            }
        }

        PositiveNeutral {
            seconds: rows.iter().map(|&i| weighted.seconds[i]).collect(),
            positive,
            neutral,
        }
    }
}

impl Tabular for PositiveNeutral {
    fn seconds(&self) -> &[i16] {
        &self.seconds
    }

    fn float_columns(&self) -> Vec<(&str, &[f64])> {
        vec![
            (POSITIVE_COLUMN, self.positive.as_slice()),
            (NEUTRAL_COLUMN, self.neutral.as_slice()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Weight curve
// ---------------------------------------------------------------------------

pub const WEIGHT_CURVE_COLUMN: &str = "peso";

/// The weighting curve sampled at every second of a tidy table.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightCurve {
    pub law: PowerLaw,
    pub seconds: Vec<i16>,
    pub weights: Vec<f64>,
}

impl WeightCurve {
    pub fn new(tidy: &TidyTable, law: PowerLaw) -> Self {
        WeightCurve {
            law,
            seconds: tidy.seconds.clone(),
            weights: law.weights(&tidy.seconds),
        }
    }

    /// Legend-style description, e.g. `y = 4.5167 × t^(-0.228)`.
    pub fn label(&self) -> String {
        format!("y = {:.4} × t^({:.3})", self.law.scale, self.law.exponent)
    }
}

impl Tabular for WeightCurve {
    fn seconds(&self) -> &[i16] {
        &self.seconds
    }

    fn float_columns(&self) -> Vec<(&str, &[f64])> {
        vec![(WEIGHT_CURVE_COLUMN, self.weights.as_slice())]
    }
}
