//! Power-law temporal weighting, `w(t) = a · t^b`.

use super::model::{EmotionSeries, TidyTable, WeightedTable, WEIGHTED_SUFFIX};

pub const DEFAULT_SCALE: f64 = 4.5167;
pub const DEFAULT_EXPONENT: f64 = -0.228;

/// Stand-in for `t = 0`, which is singular when `b < 0`.
const ZERO_SECOND: f64 = 0.5;

/// The weighting curve. Parameters are not validated: a non-positive
/// scale or an extreme exponent yields NaN / ±inf weights, which flow
/// into the weighted columns as ordinary values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLaw {
    /// `a`
    pub scale: f64,
    /// `b`
    pub exponent: f64,
}

impl Default for PowerLaw {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            exponent: DEFAULT_EXPONENT,
        }
    }
}

impl PowerLaw {
    pub fn new(scale: f64, exponent: f64) -> Self {
        Self { scale, exponent }
    }

    /// Weight at a single instant.
    pub fn at(&self, t: f64) -> f64 {
        let t = if t == 0.0 { ZERO_SECOND } else { t };
        self.scale * t.powf(self.exponent)
    }

    /// Raw weights for a whole time index.
    pub fn weights<T>(&self, t: &[T]) -> Vec<f64>
    where
        T: Copy + Into<f64>,
    {
        t.iter().map(|&ti| self.at(ti.into())).collect()
    }

    /// Weights rescaled to sum to 1.
    pub fn normalized_weights<T>(&self, t: &[T]) -> Vec<f64>
    where
        T: Copy + Into<f64>,
    {
        let weights = self.weights(t);
        let total: f64 = weights.iter().sum();
        weights.into_iter().map(|w| w / total).collect()
    }
}

/// Weight every emotion column of `tidy` with the raw (unnormalized)
/// curve `a · t^b`. The tidy table itself is left as is.
pub fn apply_weighting(tidy: &TidyTable, a: f64, b: f64) -> WeightedTable {
    let weights = PowerLaw::new(a, b).weights(&tidy.seconds);

    let series = tidy
        .series
        .iter()
        .map(|s| EmotionSeries {
            emotion: s.emotion,
            name: format!("{}{WEIGHTED_SUFFIX}", s.name),
            values: s
                .values
                .iter()
                .zip(&weights)
                .map(|(v, w)| v * w)
                .collect(),
        })
        .collect();

    log::info!("Weighting applied (a={a}, b={b})");
    WeightedTable {
        seconds: tidy.seconds.clone(),
        weights,
        series,
    }
}
