//! Writes `sample_emotions.csv`, a synthetic interval-layout export:
//! a metadata row, one row per emotion, `E AVG` / `E MAX` summaries.

use anyhow::{Context, Result};

const SECONDS: usize = 30;

const EMOTIONS: [(&str, f64, f64); 9] = [
    // (label, baseline, drift per second)
    ("Negative", 8.0, 0.10),
    ("Disgust", 4.0, 0.05),
    ("Fear", 3.0, -0.02),
    ("Sadness", 12.0, 0.30),
    ("Skepticism", 6.0, 0.00),
    ("Neutral", 40.0, -0.50),
    ("Surprise", 10.0, -0.20),
    ("Delight", 20.0, 0.60),
    // not a recognized emotion, dropped by the normalizer
    ("Engagement", 55.0, 0.00),
];

/// Deterministic jitter so the sample file is reproducible
/// (64-bit LCG, high bits only).
struct Jitter(u64);

impl Jitter {
    /// Uniform noise in `[-amplitude, amplitude]`.
    fn next(&mut self, amplitude: f64) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let unit = (self.0 >> 11) as f64 / (1u64 << 53) as f64;
        (unit * 2.0 - 1.0) * amplitude
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let mut jitter = Jitter(42);

    let mut header = vec!["Emotion".to_string()];
    header.extend((0..SECONDS).map(|s| format!("{s}s-{}s", s + 1)));
    header.push("E AVG".to_string());
    header.push("E MAX".to_string());

    let output_path = "sample_emotions.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;
    writer.write_record(&header)?;

    // The tool repeats its column labels as the first data row.
    let mut meta = vec!["Emotion".to_string()];
    meta.extend(header[1..].iter().cloned());
    writer.write_record(&meta)?;

    for (label, baseline, drift) in EMOTIONS {
        let scores: Vec<f64> = (0..SECONDS)
            .map(|s| (baseline + drift * s as f64 + jitter.next(2.5)).clamp(0.0, 100.0))
            .collect();
        let avg = scores.iter().sum::<f64>() / scores.len() as f64;
        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let mut row = vec![label.to_string()];
        row.extend(scores.iter().map(|v| format!("{v:.2}")));
        row.push(format!("{avg:.2}"));
        row.push(format!("{max:.2}"));
        writer.write_record(&row)?;
    }
    writer.flush()?;

    log::info!("Wrote {} emotions × {SECONDS} seconds", EMOTIONS.len());
    println!("Wrote {output_path}");
    Ok(())
}
