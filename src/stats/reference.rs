//! Loader for the historical reference dataset CSV.
//!
//! The file is consumed exactly once at startup to derive a handful of
//! column statistics (mean, sample std, mode); the rows themselves are
//! discarded afterwards.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("failed to open reference dataset {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("io error reading reference dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("reference dataset has no header row")]
    MissingHeader,
    #[error("row {line} has {got} cells but the header names {expected} columns")]
    ColumnCountMismatch {
        line: usize,
        got: usize,
        expected: usize,
    },
    #[error("reference dataset is missing required column '{0}'")]
    MissingColumn(String),
    #[error("column '{column}' has no numeric values")]
    EmptyColumn { column: String },
}

/// Column-oriented view of the reference CSV.
///
/// Cells that do not parse as numbers are kept as `None` and skipped by the
/// statistics, matching how the original pipeline treated them.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    headers: Vec<String>,
    columns: Vec<Vec<Option<f64>>>,
}

impl ReferenceDataset {
    /// Load and parse a reference CSV from disk.
    pub fn load(path: &Path) -> Result<Self, ReferenceError> {
        let file = File::open(path).map_err(|source| ReferenceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(BufReader::new(file))
    }

    /// Parse CSV text from any reader. Blank lines are ignored.
    pub fn parse<R: Read>(reader: BufReader<R>) -> Result<Self, ReferenceError> {
        let mut lines = reader.lines();
        let header_line = loop {
            match lines.next() {
                Some(line) => {
                    let line = line?;
                    if !line.trim().is_empty() {
                        break line;
                    }
                }
                None => return Err(ReferenceError::MissingHeader),
            }
        };
        let headers: Vec<String> = header_line
            .split(',')
            .map(|cell| cell.trim().to_string())
            .collect();
        let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::new(); headers.len()];

        for (idx, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let cells: Vec<&str> = line.split(',').collect();
            if cells.len() != headers.len() {
                return Err(ReferenceError::ColumnCountMismatch {
                    // +2: one for the header row, one for 1-based numbering.
                    line: idx + 2,
                    got: cells.len(),
                    expected: headers.len(),
                });
            }
            for (column, cell) in columns.iter_mut().zip(&cells) {
                column.push(cell.trim().parse::<f64>().ok());
            }
        }
        Ok(Self { headers, columns })
    }

    fn column(&self, name: &str) -> Result<Vec<f64>, ReferenceError> {
        let idx = self
            .headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ReferenceError::MissingColumn(name.to_string()))?;
        let values: Vec<f64> = self.columns[idx].iter().flatten().copied().collect();
        if values.is_empty() {
            return Err(ReferenceError::EmptyColumn {
                column: name.to_string(),
            });
        }
        Ok(values)
    }

    /// Arithmetic mean of a column's numeric values.
    pub fn mean(&self, name: &str) -> Result<f64, ReferenceError> {
        let values = self.column(name)?;
        Ok(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Sample standard deviation (n-1 divisor, the pandas default).
    pub fn std(&self, name: &str) -> Result<f64, ReferenceError> {
        let values = self.column(name)?;
        if values.len() < 2 {
            return Ok(0.0);
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
        Ok(var.sqrt())
    }

    /// Most frequent value in a column; the smallest value wins ties.
    pub fn mode(&self, name: &str) -> Result<f64, ReferenceError> {
        let mut values = self.column(name)?;
        values.sort_by(f64::total_cmp);

        let mut best_value = values[0];
        let mut best_count = 0usize;
        let mut run_value = values[0];
        let mut run_count = 0usize;
        for &v in &values {
            if v == run_value {
                run_count += 1;
            } else {
                run_value = v;
                run_count = 1;
            }
            // Strict comparison keeps the smallest value on equal counts.
            if run_count > best_count {
                best_count = run_count;
                best_value = run_value;
            }
        }
        Ok(best_value)
    }
}
