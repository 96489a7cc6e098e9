use std::fmt;

/// Name of the time-index column in every tidy / weighted table.
pub const SECONDS_COLUMN: &str = "segundos";
/// Name of the raw temporal weight column in a [`WeightedTable`].
pub const WEIGHT_COLUMN: &str = "peso_temporal";
/// Suffix appended to an emotion column once it has been weighted.
pub const WEIGHTED_SUFFIX: &str = "_pw";

// ---------------------------------------------------------------------------
// CellValue – a single cell as read from a spreadsheet
// ---------------------------------------------------------------------------

/// A dynamically-typed spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Empty,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Empty => Ok(()),
        }
    }
}

impl CellValue {
    /// Coerce the cell to `f64`.
    ///
    /// Empty cells become `NaN` (missing measurement); text that does not
    /// parse as a float yields `None`.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            CellValue::Empty => Some(f64::NAN),
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – the sheet exactly as read
// ---------------------------------------------------------------------------

/// A rectangular table straight from the first sheet of a file.
/// Column 0 is the label column. Every row has exactly `width()` cells;
/// [`RawTable::new`] is the only way to build one.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    /// Build a table, padding short rows with [`CellValue::Empty`] and
    /// truncating long ones so every row matches the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        RawTable { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of columns, label column included.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows (header excluded).
    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

// ---------------------------------------------------------------------------
// Emotion – the fixed set of recognized identifiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Emotion {
    Negative,
    Disgust,
    Fear,
    Sadness,
    Skepticism,
    Neutral,
    Surprise,
    Delight,
}

impl Emotion {
    pub const ALL: [Emotion; 8] = [
        Emotion::Negative,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Sadness,
        Emotion::Skepticism,
        Emotion::Neutral,
        Emotion::Surprise,
        Emotion::Delight,
    ];

    /// The series treated as "positive" in the positive-vs-neutral view.
    pub const POSITIVE: Emotion = Emotion::Delight;

    /// Identifier as exported by the recognition tool (case-sensitive).
    pub fn label(self) -> &'static str {
        match self {
            Emotion::Negative => "Negative",
            Emotion::Disgust => "Disgust",
            Emotion::Fear => "Fear",
            Emotion::Sadness => "Sadness",
            Emotion::Skepticism => "Skepticism",
            Emotion::Neutral => "Neutral",
            Emotion::Surprise => "Surprise",
            Emotion::Delight => "Delight",
        }
    }

    /// Localized display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Emotion::Negative => "Enojo",
            Emotion::Disgust => "Disgusto",
            Emotion::Fear => "Miedo",
            Emotion::Sadness => "Atención",
            Emotion::Skepticism => "Escepticismo",
            Emotion::Neutral => "Neutral",
            Emotion::Surprise => "Sorpresa",
            Emotion::Delight => "Gusto",
        }
    }

    /// Exact, case-sensitive lookup by tool identifier.
    pub fn from_label(label: &str) -> Option<Emotion> {
        Emotion::ALL.into_iter().find(|e| e.label() == label)
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// EmotionSeries – one named column of a tidy / weighted table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct EmotionSeries {
    pub emotion: Emotion,
    /// Column name as exported (identifier, display name, or `<name>_pw`).
    pub name: String,
    pub values: Vec<f64>,
}

impl EmotionSeries {
    fn select(&self, rows: &[usize]) -> Self {
        EmotionSeries {
            emotion: self.emotion,
            name: self.name.clone(),
            values: rows.iter().map(|&i| self.values[i]).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// TidyTable – one row per second, one column per emotion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TidyTable {
    pub seconds: Vec<i16>,
    /// Emotion columns in source row order.
    pub series: Vec<EmotionSeries>,
}

impl TidyTable {
    pub fn len(&self) -> usize {
        self.seconds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seconds.is_empty()
    }

    /// Emotion column names, in order.
    pub fn emotion_names(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.name.as_str()).collect()
    }

    /// Look up an emotion column by its name.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.series
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.values.as_slice())
    }

    /// Copy of the table restricted to the given row indices.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        TidyTable {
            seconds: rows.iter().map(|&i| self.seconds[i]).collect(),
            series: self.series.iter().map(|s| s.select(rows)).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// WeightedTable – seconds, raw weight, and one weighted column per emotion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct WeightedTable {
    pub seconds: Vec<i16>,
    /// `peso_temporal`; row `i` belongs to `seconds[i]`.
    pub weights: Vec<f64>,
    /// `<emotion>_pw` columns, same order as the tidy table.
    pub series: Vec<EmotionSeries>,
}

impl WeightedTable {
    pub fn len(&self) -> usize {
        self.seconds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seconds.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.series
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.values.as_slice())
    }

    /// The weighted series for a given emotion, whatever its display name.
    pub fn series_for(&self, emotion: Emotion) -> Option<&EmotionSeries> {
        self.series.iter().find(|s| s.emotion == emotion)
    }

    pub fn select_rows(&self, rows: &[usize]) -> Self {
        WeightedTable {
            seconds: rows.iter().map(|&i| self.seconds[i]).collect(),
            weights: rows.iter().map(|&i| self.weights[i]).collect(),
            series: self.series.iter().map(|s| s.select(rows)).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tabular – the shape every exporter consumes
// ---------------------------------------------------------------------------

/// A table made of the `segundos` index followed by named float columns.
pub trait Tabular {
    fn seconds(&self) -> &[i16];

    /// Every column after `segundos`, in output order.
    fn float_columns(&self) -> Vec<(&str, &[f64])>;

    /// Full header row, `segundos` first.
    fn column_names(&self) -> Vec<String> {
        std::iter::once(SECONDS_COLUMN.to_string())
            .chain(self.float_columns().into_iter().map(|(n, _)| n.to_string()))
            .collect()
    }
}

impl Tabular for TidyTable {
    fn seconds(&self) -> &[i16] {
        &self.seconds
    }

    fn float_columns(&self) -> Vec<(&str, &[f64])> {
        self.series
            .iter()
            .map(|s| (s.name.as_str(), s.values.as_slice()))
            .collect()
    }
}

impl Tabular for WeightedTable {
    fn seconds(&self) -> &[i16] {
        &self.seconds
    }

    fn float_columns(&self) -> Vec<(&str, &[f64])> {
        std::iter::once((WEIGHT_COLUMN, self.weights.as_slice()))
            .chain(
                self.series
                    .iter()
                    .map(|s| (s.name.as_str(), s.values.as_slice())),
            )
            .collect()
    }
}
