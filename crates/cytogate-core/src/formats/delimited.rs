use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use super::{MeasurementColumns, MeasurementSet};
use crate::error::{CytogateError, Result};
use crate::models::Point;

/// Read a comma separated measurement file from disk
pub fn read_measurements(path: &Path, columns: &MeasurementColumns) -> Result<MeasurementSet> {
    let file = File::open(path)?;
    let set = read_measurements_from(file, columns)?;
    tracing::info!(
        path = %path.display(),
        points = set.points.len(),
        dropped = set.dropped_rows,
        "Loaded measurements"
    );
    Ok(set)
}

/// Read comma separated measurements from any reader
pub fn read_measurements_from<R: Read>(
    reader: R,
    columns: &MeasurementColumns,
) -> Result<MeasurementSet> {
    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let a_x = column_index(&headers, &columns.a_x)?;
    let b_x = column_index(&headers, &columns.b_x)?;
    let y = column_index(&headers, &columns.y)?;

    let mut set = MeasurementSet::default();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        match (field(&record, a_x), field(&record, b_x), field(&record, y)) {
            (Some(xa), Some(xb), Some(y)) => set.points.push(Point::new([xa, y], [xb, y])),
            _ => {
                tracing::debug!(row = row + 1, "Dropping row with missing measurement");
                set.dropped_rows += 1;
            }
        }
    }

    Ok(set)
}

fn column_index(headers: &StringRecord, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| CytogateError::MissingColumn { column: column.to_string() })
}

fn field(record: &StringRecord, index: usize) -> Option<f64> {
    record.get(index)?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
