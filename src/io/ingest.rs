//! CSV dataset ingest.
//!
//! Datasets are plain CSVs with one header row. Column kinds are inferred:
//! a column where every non-empty cell parses as a float is numeric (empty
//! cells become NaN and drop out at matrix-build time); anything else is
//! categorical, with cell text taken verbatim as the level.
//!
//! Design goals, shared with the rest of the pipeline:
//! - clear errors with exit code 2 for unreadable files, 3 for bad shapes
//! - deterministic behavior (no sampling, no reordering)
//! - no fitting logic here

use std::fs::File;
use std::path::Path;

use crate::data::frame::{Column, Frame};
use crate::error::AppError;

/// Load a dataset CSV into a frame.
pub fn load_frame(path: &Path) -> Result<Frame, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open dataset '{}': {e}", path.display())))?;
    frame_from_reader(file, &path.display().to_string())
}

/// Parse CSV from any reader (separated out for tests).
pub fn frame_from_reader<R: std::io::Read>(reader: R, source: &str) -> Result<Frame, AppError> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers from '{source}': {e}")))?
        .clone();

    let n_cols = headers.len();
    let mut cells: Vec<Vec<String>> = vec![Vec::new(); n_cols];

    for (idx, result) in csv.records().enumerate() {
        // +2: records() starts after the header row, CSV lines are 1-based.
        let line = idx + 2;
        let record = result
            .map_err(|e| AppError::new(3, format!("CSV parse error in '{source}' line {line}: {e}")))?;
        if record.len() != n_cols {
            return Err(AppError::new(
                3,
                format!(
                    "'{source}' line {line} has {} fields, expected {n_cols}.",
                    record.len()
                ),
            ));
        }
        for (j, value) in record.iter().enumerate() {
            cells[j].push(value.to_string());
        }
    }

    if cells.first().map(|c| c.len()).unwrap_or(0) == 0 {
        return Err(AppError::new(3, format!("Dataset '{source}' has no data rows.")));
    }

    let pairs: Vec<(String, Column)> = headers
        .iter()
        .zip(cells.into_iter())
        .map(|(name, values)| (name.to_string(), infer_column(values)))
        .collect();

    Frame::new(pairs)
}

/// Numeric if every non-empty cell parses as f64; categorical otherwise.
fn infer_column(values: Vec<String>) -> Column {
    let mut numeric = Vec::with_capacity(values.len());
    for v in &values {
        if v.is_empty() {
            numeric.push(f64::NAN);
            continue;
        }
        match v.parse::<f64>() {
            Ok(x) => numeric.push(x),
            Err(_) => return Column::Categorical(values),
        }
    }
    Column::Numeric(numeric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn load(text: &str) -> Result<Frame, AppError> {
        frame_from_reader(Cursor::new(text.as_bytes()), "test.csv")
    }

    #[test]
    fn numeric_and_categorical_columns_are_inferred() {
        let frame = load("run_step,team_fn\n1,adder\n2,mixer\n3,adder\n").unwrap();

        assert_eq!(frame.n_rows(), 3);
        assert_eq!(frame.numeric("run_step").unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!(frame.column("team_fn").unwrap().levels(), ["adder", "mixer"]);
    }

    #[test]
    fn empty_numeric_cells_become_nan() {
        let frame = load("x\n1.5\n\n2.5\n").unwrap();
        let x = frame.numeric("x").unwrap();
        assert_eq!(x[0], 1.5);
        assert!(x[1].is_nan());
        assert_eq!(x[2], 2.5);
    }

    #[test]
    fn mixed_column_falls_back_to_categorical() {
        let frame = load("x\n1.5\nabc\n").unwrap();
        assert!(frame.numeric("x").is_err());
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let err = load("a,b\n").unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn ragged_rows_are_an_error() {
        let err = load("a,b\n1,2\n3\n").unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
