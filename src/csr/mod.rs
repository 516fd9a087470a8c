//! Compressed sparse row layout for numeric kernels
//!
//! Rows are samples, columns are zero-based feature indices:
//!
//! ```text
//! row_ptr[0] = 0
//! row_ptr[r + 1] = row_ptr[r] + nnz(row r)
//! row r = col_ind[row_ptr[r]..row_ptr[r + 1]], values[row_ptr[r]..row_ptr[r + 1]]
//! self_dot[r] = sum of squared values of row r
//! ```
//!
//! Offsets and column indices are `i32`, the element type device kernels
//! take for index buffers.

use crate::core::{features_of, Result, SVMError, Sample, SampleSet};
use log::debug;

/// Sparse samples in CSR form, together with the samples they came from
#[derive(Debug, Clone)]
pub struct CsrMatrix {
    samples: Vec<Sample>,
    values: Vec<f64>,
    self_dot: Vec<f64>,
    row_ptr: Vec<i32>,
    col_ind: Vec<i32>,
    max_features: usize,
}

impl CsrMatrix {
    /// Convert sentinel-terminated samples into CSR buffers
    ///
    /// The samples are kept unchanged inside the matrix and can be recovered
    /// with [`CsrMatrix::into_samples`]. On error the samples are dropped;
    /// callers that still need them after a failure should convert a copy,
    /// e.g. through [`CsrMatrix::from_problem`].
    pub fn build(samples: Vec<Sample>) -> Result<Self> {
        let nnz_hint: usize = samples.iter().map(|s| s.len().saturating_sub(1)).sum();
        let mut values = Vec::with_capacity(nnz_hint);
        let mut col_ind = Vec::with_capacity(nnz_hint);
        let mut self_dot = Vec::with_capacity(samples.len());
        let mut row_ptr = Vec::with_capacity(samples.len() + 1);
        let mut max_features = 0;

        for (r, sample) in samples.iter().enumerate() {
            row_ptr.push(to_offset(values.len())?);

            let features = features_of(sample).ok_or_else(|| {
                SVMError::MalformedInput(format!("row {r} is not terminated by a sentinel node"))
            })?;

            let mut sum = 0.0;
            for node in features {
                if node.index < 1 {
                    return Err(SVMError::MalformedInput(format!(
                        "row {r} has feature index {}, expected a one-based index",
                        node.index
                    )));
                }
                values.push(node.value);
                sum += node.value * node.value;
                col_ind.push(node.index - 1);
            }

            self_dot.push(sum);
            max_features = max_features.max(features.len());
        }
        row_ptr.push(to_offset(values.len())?);

        debug!(
            "built CSR matrix: {} rows, {} non-zeros, max {} features per row",
            samples.len(),
            values.len(),
            max_features
        );

        Ok(Self {
            samples,
            values,
            self_dot,
            row_ptr,
            col_ind,
            max_features,
        })
    }

    /// Convert a copy of a labeled sample set
    pub fn from_problem<S: SampleSet>(set: &S) -> Result<Self> {
        Self::build(set.samples().to_vec())
    }

    /// Non-zero values, row-major
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Squared L2 norm of every row
    pub fn self_dot(&self) -> &[f64] {
        &self.self_dot
    }

    /// Row start offsets, `num_rows() + 1` entries
    pub fn row_ptr(&self) -> &[i32] {
        &self.row_ptr
    }

    /// Zero-based column index of every value
    pub fn col_ind(&self) -> &[i32] {
        &self.col_ind
    }

    /// Total number of non-zeros
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.samples.len()
    }

    /// Most non-zeros in a single row
    pub fn max_features(&self) -> usize {
        self.max_features
    }

    /// Column indices and values of row `r`
    ///
    /// # Panics
    /// Panics if `r >= num_rows()`
    pub fn row(&self, r: usize) -> (&[i32], &[f64]) {
        let start = self.row_ptr[r] as usize;
        let end = self.row_ptr[r + 1] as usize;
        (&self.col_ind[start..end], &self.values[start..end])
    }

    /// Fraction of non-zero cells for a matrix `num_cols` wide
    pub fn density(&self, num_cols: usize) -> f64 {
        let cells = self.num_rows() as f64 * num_cols as f64;
        if cells == 0.0 {
            0.0
        } else {
            self.nnz() as f64 / cells
        }
    }

    /// Samples the matrix was built from
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Give the samples back to the caller
    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }
}

fn to_offset(n: usize) -> Result<i32> {
    i32::try_from(n).map_err(|_| {
        SVMError::MalformedInput(format!("{n} non-zeros exceed the i32 offset range"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{sample_from_pairs, SvmNode};
    use crate::problem::SvmProblem;
    use approx::assert_relative_eq;

    #[test]
    fn test_build_two_rows() {
        let samples = vec![
            sample_from_pairs(&[(1, 0.5), (3, 2.0)]),
            sample_from_pairs(&[(2, 1.0)]),
        ];
        let csr = CsrMatrix::build(samples).unwrap();

        assert_eq!(csr.row_ptr(), &[0, 2, 3]);
        assert_eq!(csr.col_ind(), &[0, 2, 1]);
        assert_eq!(csr.values(), &[0.5, 2.0, 1.0]);
        assert_relative_eq!(csr.self_dot()[0], 4.25);
        assert_relative_eq!(csr.self_dot()[1], 1.0);
        assert_eq!(csr.max_features(), 2);
        assert_eq!(csr.nnz(), 3);
        assert_eq!(csr.num_rows(), 2);
    }

    #[test]
    fn test_samples_keep_sentinel() {
        let samples = vec![
            sample_from_pairs(&[(4, 1.0), (9, -2.0)]),
            sample_from_pairs(&[]),
        ];
        let csr = CsrMatrix::build(samples.clone()).unwrap();

        assert_eq!(csr.samples(), &samples[..]);
        for sample in csr.into_samples() {
            assert_eq!(sample.last(), Some(&SvmNode::SENTINEL));
        }
    }

    #[test]
    fn test_empty_rows() {
        let samples = vec![
            sample_from_pairs(&[]),
            sample_from_pairs(&[(2, 3.0)]),
            sample_from_pairs(&[]),
        ];
        let csr = CsrMatrix::build(samples).unwrap();

        assert_eq!(csr.row_ptr(), &[0, 0, 1, 1]);
        assert_eq!(csr.self_dot(), &[0.0, 9.0, 0.0]);
        let (cols, vals) = csr.row(0);
        assert!(cols.is_empty() && vals.is_empty());
        assert_eq!(csr.row(1), (&[1][..], &[3.0][..]));
    }

    #[test]
    fn test_no_samples() {
        let csr = CsrMatrix::build(Vec::new()).unwrap();
        assert_eq!(csr.row_ptr(), &[0]);
        assert_eq!(csr.nnz(), 0);
        assert_eq!(csr.max_features(), 0);
        assert_eq!(csr.density(10), 0.0);
    }

    #[test]
    fn test_density_with_huge_width() {
        let csr = CsrMatrix::build(vec![
            sample_from_pairs(&[(1, 1.0)]),
            sample_from_pairs(&[(2, 1.0)]),
        ])
        .unwrap();

        let density = csr.density(usize::MAX);
        assert!(density > 0.0 && density < 1e-15);
    }

    #[test]
    fn test_from_problem_keeps_data_on_error() {
        let samples = vec![
            sample_from_pairs(&[(1, 1.0)]),
            vec![SvmNode::new(2, 2.0)],
        ];
        let problem = SvmProblem::new(samples.clone(), vec![1, -1]).unwrap();

        assert!(matches!(
            CsrMatrix::from_problem(&problem),
            Err(SVMError::MalformedInput(_))
        ));
        assert_eq!(problem.samples(), &samples[..]);
    }

    #[test]
    fn test_missing_sentinel() {
        let samples = vec![
            sample_from_pairs(&[(1, 1.0)]),
            vec![SvmNode::new(1, 1.0), SvmNode::new(2, 2.0)],
        ];
        let result = CsrMatrix::build(samples);
        assert!(matches!(result, Err(SVMError::MalformedInput(msg)) if msg.contains("row 1")));

        assert!(matches!(
            CsrMatrix::build(vec![Vec::new()]),
            Err(SVMError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_non_positive_index() {
        let zero = vec![sample_from_pairs(&[(0, 1.0)])];
        assert!(matches!(
            CsrMatrix::build(zero),
            Err(SVMError::MalformedInput(_))
        ));

        let inner_sentinel = vec![vec![
            SvmNode::new(1, 1.0),
            SvmNode::SENTINEL,
            SvmNode::new(2, 1.0),
            SvmNode::SENTINEL,
        ]];
        assert!(matches!(
            CsrMatrix::build(inner_sentinel),
            Err(SVMError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_self_dot_matches_rows() {
        let samples = vec![
            sample_from_pairs(&[(1, 0.1), (2, -0.7), (5, 3.3)]),
            sample_from_pairs(&[(3, 1.5)]),
            sample_from_pairs(&[(1, -2.0), (8, 0.25)]),
        ];
        let csr = CsrMatrix::build(samples).unwrap();

        for r in 0..csr.num_rows() {
            let (_, vals) = csr.row(r);
            let expected: f64 = vals.iter().map(|v| v * v).sum();
            assert_relative_eq!(csr.self_dot()[r], expected, epsilon = 1e-12);
        }
        assert_relative_eq!(csr.density(8), 6.0 / 24.0);
    }

    #[test]
    fn test_from_problem_leaves_problem_intact() {
        let samples = vec![
            sample_from_pairs(&[(1, 1.0)]),
            sample_from_pairs(&[(2, 2.0), (3, 3.0)]),
        ];
        let problem = SvmProblem::new(samples.clone(), vec![1, 2]).unwrap();
        let sub = problem.sub_problem(1, 0).unwrap();
        let csr = CsrMatrix::from_problem(&sub).unwrap();

        assert_eq!(csr.row_ptr(), &[0, 2, 3]);
        assert_eq!(csr.col_ind(), &[1, 2, 0]);
        assert_eq!(problem.samples(), &samples[..]);
    }
}
