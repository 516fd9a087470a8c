//! Utility functions for inspecting prepared data

use crate::core::{features_of, Sample, SampleSet};

/// Statistical utilities for problems and CSR matrices
pub mod stats {
    use super::*;
    use crate::csr::CsrMatrix;
    use crate::problem::SvmProblem;

    /// Non-zeros per row of a sample list
    ///
    /// Samples without a sentinel are measured over all their nodes.
    pub fn sparse_vector_stats(samples: &[Sample]) -> SparseVectorStats {
        let nnz: Vec<usize> = samples
            .iter()
            .map(|s| features_of(s).map_or(s.len(), |f| f.len()))
            .collect();
        SparseVectorStats::from_row_lengths(&nnz)
    }

    /// Non-zeros per row of a CSR matrix
    pub fn csr_stats(matrix: &CsrMatrix) -> SparseVectorStats {
        let nnz: Vec<usize> = matrix
            .row_ptr()
            .windows(2)
            .map(|w| (w[1] - w[0]) as usize)
            .collect();
        SparseVectorStats::from_row_lengths(&nnz)
    }

    /// Per-class sample counts of a problem, largest class first
    pub fn class_balance(problem: &SvmProblem) -> Vec<(i32, usize)> {
        let grouping = problem.grouping();
        let mut balance: Vec<(i32, usize)> = grouping
            .labels()
            .iter()
            .copied()
            .zip(grouping.counts().iter().copied())
            .collect();
        balance.sort_by(|a, b| b.1.cmp(&a.1));
        balance
    }

    /// Ratio of the largest to the smallest class
    pub fn imbalance_ratio(problem: &SvmProblem) -> f64 {
        let counts = problem.grouping().counts();
        match (counts.iter().max(), counts.iter().min()) {
            (Some(&max), Some(&min)) if min > 0 => max as f64 / min as f64,
            _ => 0.0,
        }
    }

    /// Sample count per label value, in first-occurrence order
    pub fn label_histogram<S: SampleSet>(set: &S) -> Vec<(i32, usize)> {
        let mut histogram: Vec<(i32, usize)> = Vec::new();
        for &label in set.labels() {
            match histogram.iter_mut().find(|(l, _)| *l == label) {
                Some((_, count)) => *count += 1,
                None => histogram.push((label, 1)),
            }
        }
        histogram
    }
}

/// Statistics for sparse row analysis
#[derive(Debug, Clone, Default)]
pub struct SparseVectorStats {
    pub mean_nnz: f64,
    pub min_nnz: usize,
    pub max_nnz: usize,
    pub variance_nnz: f64,
    pub total_nnz: usize,
    pub total_samples: usize,
}

impl SparseVectorStats {
    fn from_row_lengths(nnz: &[usize]) -> Self {
        if nnz.is_empty() {
            return Self::default();
        }

        let total_nnz: usize = nnz.iter().sum();
        let mean_nnz = total_nnz as f64 / nnz.len() as f64;
        let variance_nnz = if nnz.len() > 1 {
            nnz.iter()
                .map(|&x| (x as f64 - mean_nnz).powi(2))
                .sum::<f64>()
                / (nnz.len() - 1) as f64
        } else {
            0.0
        };

        Self {
            mean_nnz,
            min_nnz: nnz.iter().copied().min().unwrap_or(0),
            max_nnz: nnz.iter().copied().max().unwrap_or(0),
            variance_nnz,
            total_nnz,
            total_samples: nnz.len(),
        }
    }
}
