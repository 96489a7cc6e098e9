use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int16Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use super::model::{Tabular, SECONDS_COLUMN};
use crate::error::IoError;

/// On-disk format of exported tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Parquet,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Parquet => "parquet",
        }
    }
}

/// Write a table to `path` in the given format.
pub fn write_table<T: Tabular + ?Sized>(
    table: &T,
    path: &Path,
    format: ExportFormat,
) -> Result<(), IoError> {
    match format {
        ExportFormat::Csv => write_csv(table, path)?,
        ExportFormat::Parquet => write_parquet(table, path)?,
    }
    log::info!("Exported {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV writer
// ---------------------------------------------------------------------------

fn write_csv<T: Tabular + ?Sized>(table: &T, path: &Path) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.column_names())?;

    let columns = table.float_columns();
    for (row, second) in table.seconds().iter().enumerate() {
        let record = std::iter::once(second.to_string())
            .chain(columns.iter().map(|(_, values)| values[row].to_string()));
        writer.write_record(record)?;
    }
    writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Parquet writer
// ---------------------------------------------------------------------------

/// Arrow view of a table: `segundos` as Int16, everything else Float64.
pub fn to_record_batch<T: Tabular + ?Sized>(table: &T) -> Result<RecordBatch, ArrowError> {
    let columns = table.float_columns();

    let mut fields = vec![Field::new(SECONDS_COLUMN, DataType::Int16, false)];
    let mut arrays: Vec<ArrayRef> = vec![Arc::new(Int16Array::from(table.seconds().to_vec()))];
    for (name, values) in columns {
        fields.push(Field::new(name, DataType::Float64, false));
        arrays.push(Arc::new(Float64Array::from(values.to_vec())));
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
}

fn write_parquet<T: Tabular + ?Sized>(table: &T, path: &Path) -> Result<(), IoError> {
    let batch = to_record_batch(table)?;
    let file = std::fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Emotion, EmotionSeries, TidyTable};
    use crate::data::weighting::apply_weighting;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    fn tidy() -> TidyTable {
        TidyTable {
            seconds: vec![1, 2],
            series: vec![EmotionSeries {
                emotion: Emotion::Surprise,
                name: "Surprise".into(),
                values: vec![0.25, 0.5],
            }],
        }
    }

    #[test]
    fn csv_export_uses_contract_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weighted.csv");
        let weighted = apply_weighting(&tidy(), 2.0, 0.0);
        write_table(&weighted, &path, ExportFormat::Csv).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "segundos,peso_temporal,Surprise_pw");
        assert_eq!(lines[1], "1,2,0.5");
        assert_eq!(lines[2], "2,2,1");
    }

    #[test]
    fn parquet_export_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tidy.parquet");
        write_table(&tidy(), &path, ExportFormat::Parquet).unwrap();

        let file = std::fs::File::open(&path).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)
            .unwrap()
            .build()
            .unwrap();
        let batches: Vec<RecordBatch> = reader.map(|b| b.unwrap()).collect();
        assert_eq!(batches.iter().map(|b| b.num_rows()).sum::<usize>(), 2);

        let schema = batches[0].schema();
        assert_eq!(schema.field(0).name(), "segundos");
        assert_eq!(schema.field(0).data_type(), &DataType::Int16);
        assert_eq!(schema.field(1).name(), "Surprise");
    }
}
