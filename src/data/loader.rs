use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use super::model::{CellValue, RawTable};
use crate::error::IoError;

/// Prefix given to header cells left blank in the source sheet.
pub const PLACEHOLDER_PREFIX: &str = "__UNNAMED__";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the first sheet of a file as a [`RawTable`].  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xls` / `.ods` – first worksheet, first row as header
/// * `.csv` – first record as header
pub fn load_file(path: &Path) -> Result<RawTable, IoError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => load_workbook(path)?,
        "csv" => load_csv(path)?,
        other => return Err(IoError::UnsupportedExtension(other.to_string())),
    };

    log::info!(
        "Loaded {} with {} columns and {} rows",
        path.display(),
        table.width(),
        table.height()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Workbook loader
// ---------------------------------------------------------------------------

fn load_workbook(path: &Path) -> Result<RawTable, IoError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IoError::NoWorksheet(path.to_path_buf()))??;

    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| IoError::MissingHeader(path.to_path_buf()))?;

    let headers = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| header_name(i, &workbook_cell(cell)))
        .collect();
    let body = rows
        .map(|row| row.iter().map(workbook_cell).collect())
        .collect();

    Ok(RawTable::new(headers, body))
}

fn workbook_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<RawTable, IoError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut records = reader.records();
    let header_record = records
        .next()
        .ok_or_else(|| IoError::MissingHeader(path.to_path_buf()))??;

    let headers = header_record
        .iter()
        .enumerate()
        .map(|(i, h)| header_name(i, &guess_cell_type(h)))
        .collect();

    let mut body = Vec::new();
    for record in records {
        let record = record?;
        body.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(RawTable::new(headers, body))
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.trim().is_empty() {
        return CellValue::Empty;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::Text(s.to_string())
}

// -- Header helpers --

/// Render a header cell as a column name.
///
/// Whole-number floats drop their fraction (`3.0` → `"3"`) so numeric
/// second headers parse as integers; blank cells get a placeholder name.
fn header_name(index: usize, cell: &CellValue) -> String {
    match cell {
        CellValue::Empty => format!("{PLACEHOLDER_PREFIX}{index}"),
        CellValue::Text(s) if s.trim().is_empty() => format!("{PLACEHOLDER_PREFIX}{index}"),
        CellValue::Float(f) if f.fract() == 0.0 && f.is_finite() => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn header_names() {
        assert_eq!(header_name(0, &CellValue::Text("Emotion".into())), "Emotion");
        assert_eq!(header_name(2, &CellValue::Float(3.0)), "3");
        assert_eq!(header_name(2, &CellValue::Float(3.5)), "3.5");
        assert_eq!(header_name(4, &CellValue::Empty), "__UNNAMED__4");
        assert_eq!(header_name(5, &CellValue::Text("  ".into())), "__UNNAMED__5");
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("scores.txt")).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedExtension(ext) if ext == "txt"));
    }

    #[test]
    fn csv_with_blank_header_and_short_rows() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Emotion,0,1,").unwrap();
        writeln!(file, "Fear,1.5,2,").unwrap();
        writeln!(file, "Delight,3").unwrap();
        file.flush().unwrap();

        let raw = load_file(file.path()).unwrap();
        assert_eq!(raw.headers(), vec!["Emotion", "0", "1", "__UNNAMED__3"]);
        assert_eq!(raw.height(), 2);
        assert_eq!(raw.rows()[0][1], CellValue::Float(1.5));
        assert_eq!(raw.rows()[0][2], CellValue::Integer(2));
        assert_eq!(raw.rows()[1][2], CellValue::Empty);
    }

    #[test]
    fn workbook_headers_and_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.xlsx");

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Emotion").unwrap();
        sheet.write_number(0, 1, 0.0).unwrap();
        // column 2 header left blank
        sheet.write_number(0, 3, 1.0).unwrap();
        sheet.write_string(1, 0, "Delight").unwrap();
        sheet.write_number(1, 1, 10.0).unwrap();
        sheet.write_string(1, 2, "note").unwrap();
        sheet.write_number(1, 3, 20.5).unwrap();
        sheet.write_string(2, 0, "Fear").unwrap();
        sheet.write_boolean(2, 1, true).unwrap();
        workbook.save(&path).unwrap();

        let raw = load_file(&path).unwrap();
        assert_eq!(raw.headers(), vec!["Emotion", "0", "__UNNAMED__2", "1"]);
        assert_eq!(raw.height(), 2);
        assert_eq!(raw.rows()[0][0], CellValue::Text("Delight".into()));
        assert_eq!(raw.rows()[0][1], CellValue::Float(10.0));
        assert_eq!(raw.rows()[0][2], CellValue::Text("note".into()));
        assert_eq!(raw.rows()[0][3], CellValue::Float(20.5));
        assert_eq!(raw.rows()[1][1], CellValue::Bool(true));
        assert_eq!(raw.rows()[1][3], CellValue::Empty);

        let tidy = crate::data::normalize::normalize(&raw).unwrap();
        assert_eq!(tidy.seconds, vec![0, 1]);
        assert_eq!(tidy.column("Delight").unwrap(), &[10.0, 20.5]);
    }

    #[test]
    fn corrupt_workbook_is_a_workbook_error() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        file.write_all(b"this is not a zip archive").unwrap();
        file.flush().unwrap();

        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, IoError::Workbook(_)), "got {err:?}");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file(Path::new("/nonexistent/dir/scores.csv")).unwrap_err();
        assert!(matches!(err, IoError::Csv(_)));
    }
}
