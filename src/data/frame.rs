//! A small column-oriented frame.
//!
//! This is deliberately not a general dataframe: the pipeline only needs named
//! columns of two kinds (numeric and categorical), row counts, and in-place
//! mutation of numeric columns for the normalization pass.

use crate::error::AppError;

/// One named column of data.
#[derive(Debug, Clone)]
pub enum Column {
    Numeric(Vec<f64>),
    Categorical(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Categorical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted distinct levels of a categorical column.
    pub fn levels(&self) -> Vec<String> {
        match self {
            Column::Numeric(_) => Vec::new(),
            Column::Categorical(v) => {
                let mut levels: Vec<String> = v.clone();
                levels.sort();
                levels.dedup();
                levels
            }
        }
    }
}

/// A table of simulation runs: rows are runs, columns are named metrics.
#[derive(Debug, Clone)]
pub struct Frame {
    names: Vec<String>,
    columns: Vec<Column>,
    n_rows: usize,
}

impl Frame {
    /// Build a frame from `(name, column)` pairs.
    ///
    /// All columns must have the same length and names must be unique.
    pub fn new(pairs: Vec<(String, Column)>) -> Result<Frame, AppError> {
        let n_rows = pairs.first().map(|(_, c)| c.len()).unwrap_or(0);

        let mut names = Vec::with_capacity(pairs.len());
        let mut columns = Vec::with_capacity(pairs.len());
        for (name, column) in pairs {
            if column.len() != n_rows {
                return Err(AppError::new(
                    3,
                    format!(
                        "Column '{name}' has {} rows, expected {n_rows}.",
                        column.len()
                    ),
                ));
            }
            if names.contains(&name) {
                return Err(AppError::new(3, format!("Duplicate column name '{name}'.")));
            }
            names.push(name);
            columns.push(column);
        }

        Ok(Frame {
            names,
            columns,
            n_rows,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        let idx = self.names.iter().position(|n| n == name)?;
        Some(&self.columns[idx])
    }

    /// Numeric column access with a dataset-level error on mismatch.
    pub fn numeric(&self, name: &str) -> Result<&[f64], AppError> {
        match self.column(name) {
            Some(Column::Numeric(v)) => Ok(v),
            Some(Column::Categorical(_)) => Err(AppError::new(
                3,
                format!("Column '{name}' is categorical, expected numeric."),
            )),
            None => Err(AppError::new(3, format!("Column '{name}' not found in dataset."))),
        }
    }

    /// Mutable numeric column access (used by the normalization pass).
    pub fn numeric_mut(&mut self, name: &str) -> Option<&mut Vec<f64>> {
        let idx = self.names.iter().position(|n| n == name)?;
        match &mut self.columns[idx] {
            Column::Numeric(v) => Some(v),
            Column::Categorical(_) => None,
        }
    }
}
