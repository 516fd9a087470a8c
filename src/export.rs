//! CSR buffer export
//!
//! Writes the buffers of a [`CsrMatrix`] to JSON so they can be inspected or
//! fed to an external kernel, and reads them back with invariant checks.

use crate::core::{Result, SVMError};
use crate::csr::CsrMatrix;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Serializable CSR buffers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrExport {
    /// Number of rows
    pub num_rows: usize,
    /// Number of non-zeros
    pub nnz: usize,
    /// Most non-zeros in a single row
    pub max_features: usize,
    /// Row start offsets
    pub row_ptr: Vec<i32>,
    /// Zero-based column indices
    pub col_ind: Vec<i32>,
    /// Non-zero values
    pub values: Vec<f64>,
    /// Squared L2 norm per row
    pub self_dot: Vec<f64>,
    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Where an export came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Library version used to create the export
    pub library_version: String,
    /// Free-form description of the source data
    pub source: String,
    /// Creation timestamp
    pub created_at: String,
}

impl CsrExport {
    /// Capture the buffers of a matrix
    pub fn from_matrix(matrix: &CsrMatrix, source: impl Into<String>) -> Self {
        Self {
            num_rows: matrix.num_rows(),
            nnz: matrix.nnz(),
            max_features: matrix.max_features(),
            row_ptr: matrix.row_ptr().to_vec(),
            col_ind: matrix.col_ind().to_vec(),
            values: matrix.values().to_vec(),
            self_dot: matrix.self_dot().to_vec(),
            metadata: ExportMetadata {
                library_version: env!("CARGO_PKG_VERSION").to_string(),
                source: source.into(),
                created_at: chrono::Utc::now().to_rfc3339(),
            },
        }
    }

    /// Check the CSR layout invariants
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(SVMError::InvalidDataset(msg)) };

        if self.row_ptr.len().checked_sub(1) != Some(self.num_rows) {
            return invalid(format!(
                "row_ptr has {} entries for {} rows",
                self.row_ptr.len(),
                self.num_rows
            ));
        }
        if self.self_dot.len() != self.num_rows {
            return invalid(format!(
                "self_dot has {} entries for {} rows",
                self.self_dot.len(),
                self.num_rows
            ));
        }
        if self.values.len() != self.nnz || self.col_ind.len() != self.nnz {
            return invalid(format!(
                "expected {} values and column indices, got {} and {}",
                self.nnz,
                self.values.len(),
                self.col_ind.len()
            ));
        }
        let nnz = i32::try_from(self.nnz).map_err(|_| {
            SVMError::InvalidDataset(format!("{} non-zeros exceed the i32 offset range", self.nnz))
        })?;
        if self.row_ptr.first() != Some(&0) || self.row_ptr.last() != Some(&nnz) {
            return invalid("row_ptr must run from 0 to nnz".to_string());
        }
        if self.row_ptr.windows(2).any(|w| w[0] > w[1]) {
            return invalid("row_ptr is not monotone".to_string());
        }
        if self.col_ind.iter().any(|&c| c < 0) {
            return invalid("negative column index".to_string());
        }

        let mut max_features = 0;
        for (r, w) in self.row_ptr.windows(2).enumerate() {
            let row = &self.values[w[0] as usize..w[1] as usize];
            let sum: f64 = row.iter().map(|v| v * v).sum();
            if (sum - self.self_dot[r]).abs() > 1e-9 * sum.abs().max(1.0) {
                return invalid(format!("self_dot of row {r} does not match its values"));
            }
            max_features = max_features.max(row.len());
        }
        if max_features != self.max_features {
            return invalid(format!(
                "max_features is {}, rows have at most {}",
                self.max_features, max_features
            ));
        }

        Ok(())
    }

    /// Save export to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path).map_err(SVMError::IoError)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| SVMError::SerializationError(e.to_string()))?;
        Ok(())
    }

    /// Load and validate an export from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(SVMError::IoError)?;
        let reader = BufReader::new(file);
        let export: Self = serde_json::from_reader(reader)
            .map_err(|e| SVMError::SerializationError(e.to_string()))?;
        export.validate()?;
        Ok(export)
    }

    /// Print export summary
    pub fn print_summary(&self) {
        println!("=== CSR Export Summary ===");
        println!("Rows: {}", self.num_rows);
        println!("Non-zeros: {}", self.nnz);
        println!("Max features per row: {}", self.max_features);
        println!("Source: {}", self.metadata.source);
        println!("Library Version: {}", self.metadata.library_version);
        println!("Created: {}", self.metadata.created_at);
    }
}
