//! Wide (emotion rows × time columns) to tidy (time rows × emotion columns).

use super::model::{CellValue, Emotion, EmotionSeries, RawTable, TidyTable};
use crate::error::FormatError;

/// Substring that marks an interval-labelled time column, e.g. `0s-1s`.
pub const INTERVAL_MARKER: &str = "s-";
/// Summary columns of the interval layout, matched by exact name.
pub const AGGREGATE_COLUMNS: [&str; 2] = ["E AVG", "E MAX"];
/// Case-insensitive marker of auto-generated placeholder columns.
const PLACEHOLDER_MARKER: &str = "UNNAMED";

// ---------------------------------------------------------------------------
// Layout classification
// ---------------------------------------------------------------------------

/// The two spreadsheet layouts exported by the recognition tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Time columns labelled by bucket (`0s-1s`), optional `E AVG` / `E MAX`
    /// summaries, and a metadata row repeated as the first data row.
    Interval,
    /// Time columns labelled by bare integer seconds, possibly interleaved
    /// with placeholder columns.
    Plain,
}

/// Decide which layout a table uses. This is the only place the header
/// marker is inspected.
pub fn classify(raw: &RawTable) -> Layout {
    if raw.headers().iter().any(|h| h.contains(INTERVAL_MARKER)) {
        Layout::Interval
    } else {
        Layout::Plain
    }
}

impl Layout {
    /// Leading data rows that carry no measurements.
    fn skipped_rows(self) -> usize {
        match self {
            Layout::Interval => 1,
            Layout::Plain => 0,
        }
    }

    /// Whether a non-label header is a time column in this layout.
    fn is_time_column(self, header: &str) -> bool {
        match self {
            Layout::Interval => {
                !AGGREGATE_COLUMNS.contains(&header) && header.contains(INTERVAL_MARKER)
            }
            Layout::Plain => !header.to_ascii_uppercase().contains(PLACEHOLDER_MARKER),
        }
    }

    /// Second value denoted by a time column header.
    fn parse_second(self, header: &str) -> Result<i16, FormatError> {
        let invalid = || FormatError::InvalidTimeHeader {
            header: header.to_string(),
        };
        let token = match self {
            // bucket end: `0s-1s` → `1s` → 1
            Layout::Interval => header
                .split('-')
                .nth(1)
                .ok_or_else(invalid)?
                .trim()
                .trim_end_matches('s'),
            Layout::Plain => header.trim(),
        };
        let value: i64 = token.parse().map_err(|_| invalid())?;
        i16::try_from(value).map_err(|_| FormatError::SecondOutOfRange {
            header: header.to_string(),
            value,
        })
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// How retained emotion columns are named in the tidy output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Naming {
    /// Keep the tool's identifiers (`Delight`).
    #[default]
    Identifier,
    /// Rename through the display translation (`Gusto`).
    Display,
}

impl Naming {
    fn column_name(self, emotion: Emotion) -> String {
        match self {
            Naming::Identifier => emotion.label().to_string(),
            Naming::Display => emotion.display_name().to_string(),
        }
    }
}

/// Normalize keeping the tool's emotion identifiers as column names.
pub fn normalize(raw: &RawTable) -> Result<TidyTable, FormatError> {
    normalize_with(raw, Naming::Identifier)
}

/// Normalize and rename emotion columns to their display names.
pub fn normalize_translated(raw: &RawTable) -> Result<TidyTable, FormatError> {
    normalize_with(raw, Naming::Display)
}

/// Reshape a raw sheet into a [`TidyTable`].
///
/// Original columns become rows (one per second), original rows become
/// emotion columns in their source order. Rows whose label is not a
/// recognized emotion are dropped without error.
pub fn normalize_with(raw: &RawTable, naming: Naming) -> Result<TidyTable, FormatError> {
    if raw.headers().is_empty() {
        return Err(FormatError::MissingLabelColumn);
    }

    let layout = classify(raw);
    log::debug!("Detected {layout:?} layout");

    let mut time_columns = Vec::new();
    let mut seconds = Vec::new();
    for (index, header) in raw.headers().iter().enumerate().skip(1) {
        if layout.is_time_column(header) {
            seconds.push(layout.parse_second(header)?);
            time_columns.push(index);
        }
    }
    if time_columns.is_empty() {
        return Err(FormatError::NoTimeColumns);
    }

    let data_rows = raw.rows().iter().skip(layout.skipped_rows());
    let mut series: Vec<EmotionSeries> = Vec::new();

    for row in data_rows {
        let Some(emotion) = Emotion::from_label(&row[0].to_string()) else {
            continue;
        };
        if series.iter().any(|s| s.emotion == emotion) {
            return Err(FormatError::DuplicateEmotion(emotion.label().to_string()));
        }

        let values = time_columns
            .iter()
            .map(|&col| coerce(&row[col], emotion, &raw.headers()[col]))
            .collect::<Result<Vec<f64>, FormatError>>()?;

        series.push(EmotionSeries {
            emotion,
            name: naming.column_name(emotion),
            values,
        });
    }

    log::debug!(
        "Normalized {} seconds × {} emotions",
        seconds.len(),
        series.len()
    );
    Ok(TidyTable { seconds, series })
}

fn coerce(cell: &CellValue, emotion: Emotion, header: &str) -> Result<f64, FormatError> {
    cell.to_f64().ok_or_else(|| FormatError::NonNumericCell {
        emotion: emotion.label().to_string(),
        header: header.to_string(),
        value: cell.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn raw(headers: &[&str], rows: Vec<Vec<CellValue>>) -> RawTable {
        RawTable::new(headers.iter().map(|h| h.to_string()).collect(), rows)
    }

    fn interval_table(headers: &[&str]) -> RawTable {
        let width = headers.len();
        let mut meta = vec![text("Emotion")];
        meta.resize(width, text("meta"));
        let mut negative = vec![text("Negative")];
        negative.extend((1..width).map(|i| CellValue::Integer(i as i64)));
        let mut delight = vec![text("Delight")];
        delight.extend((1..width).map(|i| CellValue::Float(i as f64 * 10.0)));
        raw(headers, vec![meta, negative, delight])
    }

    #[test]
    fn classify_by_marker() {
        assert_eq!(
            classify(&raw(&["Emotion", "0s-1s"], vec![])),
            Layout::Interval
        );
        assert_eq!(classify(&raw(&["Emotion", "1", "2"], vec![])), Layout::Plain);
    }

    #[test]
    fn interval_layout_drops_aggregates_and_metadata_row() {
        let tidy = normalize(&interval_table(&["Emotion", "0s-1s", "1s-2s", "E AVG", "E MAX"]))
            .unwrap();
        assert_eq!(tidy.seconds, vec![1, 2]);
        assert_eq!(tidy.emotion_names(), vec!["Negative", "Delight"]);
        assert_eq!(tidy.column("Negative").unwrap(), &[1.0, 2.0]);
        assert_eq!(tidy.column("Delight").unwrap(), &[10.0, 20.0]);
    }

    #[test]
    fn aggregate_position_does_not_matter() {
        let a = normalize(&interval_table(&["Emotion", "E MAX", "0s-1s", "E AVG", "1s-2s"]))
            .unwrap();
        let b = normalize(&interval_table(&["Emotion", "0s-1s", "1s-2s", "E AVG", "E MAX"]))
            .unwrap();
        assert_eq!(a.seconds, b.seconds);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn interval_suffix_parsing() {
        assert_eq!(Layout::Interval.parse_second("s-1s"), Ok(1));
        assert_eq!(Layout::Interval.parse_second("9s-10s"), Ok(10));
        assert_eq!(Layout::Interval.parse_second("9s- 10s "), Ok(10));
        assert!(matches!(
            Layout::Interval.parse_second("xs-ys"),
            Err(FormatError::InvalidTimeHeader { .. })
        ));
    }

    #[test]
    fn plain_layout_drops_placeholders() {
        let table = raw(
            &["Emotion", "0", "__UNNAMED__2", "1", "Unnamed: 4"],
            vec![
                vec![text("Fear"), CellValue::Float(0.1), CellValue::Empty, CellValue::Float(0.2), text("junk")],
                vec![text("Sadness"), CellValue::Float(0.3), CellValue::Empty, CellValue::Float(0.4), text("junk")],
            ],
        );
        let tidy = normalize(&table).unwrap();
        assert_eq!(tidy.seconds, vec![0, 1]);
        assert_eq!(tidy.emotion_names(), vec!["Fear", "Sadness"]);
        assert_eq!(tidy.column("Sadness").unwrap(), &[0.3, 0.4]);
    }

    #[test]
    fn keeps_source_row_order_and_drops_unknown_labels() {
        let table = raw(
            &["Emotion", "1"],
            vec![
                vec![text("Surprise"), CellValue::Integer(1)],
                vec![text("Engagement"), text("n/a")],
                vec![text("Disgust"), CellValue::Integer(2)],
            ],
        );
        let tidy = normalize(&table).unwrap();
        assert_eq!(tidy.emotion_names(), vec!["Surprise", "Disgust"]);
    }

    #[test]
    fn translated_names() {
        let tidy = normalize_translated(&interval_table(&["Emotion", "0s-1s"])).unwrap();
        assert_eq!(tidy.emotion_names(), vec!["Enojo", "Gusto"]);
        assert_eq!(tidy.series[1].emotion, Emotion::Delight);
    }

    #[test]
    fn empty_table_has_no_label_column() {
        assert_eq!(
            normalize(&raw(&[], vec![])),
            Err(FormatError::MissingLabelColumn)
        );
    }

    #[test]
    fn no_time_columns_left() {
        let table = raw(&["Emotion", "__UNNAMED__1"], vec![vec![text("Fear")]]);
        assert_eq!(normalize(&table), Err(FormatError::NoTimeColumns));
        let table = raw(&["Emotion"], vec![vec![text("Fear")]]);
        assert_eq!(normalize(&table), Err(FormatError::NoTimeColumns));
    }

    #[test]
    fn non_integer_plain_header() {
        let table = raw(&["Emotion", "1", "total"], vec![]);
        assert_eq!(
            normalize(&table),
            Err(FormatError::InvalidTimeHeader {
                header: "total".into()
            })
        );
    }

    #[test]
    fn second_out_of_range_is_rejected() {
        let table = raw(&["Emotion", "40000"], vec![]);
        assert!(matches!(
            normalize(&table),
            Err(FormatError::SecondOutOfRange { value: 40000, .. })
        ));
    }

    #[test]
    fn non_numeric_cell_is_fatal() {
        let table = raw(
            &["Emotion", "1", "2"],
            vec![vec![text("Fear"), CellValue::Integer(1), text("high")]],
        );
        assert_eq!(
            normalize(&table),
            Err(FormatError::NonNumericCell {
                emotion: "Fear".into(),
                header: "2".into(),
                value: "high".into(),
            })
        );
    }

    #[test]
    fn duplicate_emotion_rows() {
        let table = raw(
            &["Emotion", "1"],
            vec![
                vec![text("Fear"), CellValue::Integer(1)],
                vec![text("Fear"), CellValue::Integer(2)],
            ],
        );
        assert_eq!(
            normalize(&table),
            Err(FormatError::DuplicateEmotion("Fear".into()))
        );
    }

    #[test]
    fn short_rows_read_as_missing_values() {
        let table = raw(
            &["Emotion", "1", "2"],
            vec![vec![text("Fear")], vec![text("Delight"), CellValue::Integer(4)]],
        );
        let tidy = normalize(&table).unwrap();
        assert_eq!(tidy.seconds, vec![1, 2]);
        assert!(tidy.column("Fear").unwrap().iter().all(|v| v.is_nan()));
        assert_eq!(tidy.column("Delight").unwrap()[0], 4.0);
        assert!(tidy.column("Delight").unwrap()[1].is_nan());
    }

    #[test]
    fn normalizing_twice_is_identical() {
        let table = interval_table(&["Emotion", "0s-1s", "1s-2s", "2s-3s", "E AVG"]);
        assert_eq!(normalize(&table).unwrap(), normalize(&table).unwrap());
    }
}
