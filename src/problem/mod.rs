//! Multi-class problems and their one-vs-one decomposition
//!
//! An [`SvmProblem`] pairs sentinel-terminated samples with integer labels and
//! groups them by class once at construction. Binary sub-problems for any two
//! classes are then cut out of that grouping without touching the parent.

pub mod grouping;
pub mod subproblem;

pub use self::grouping::ClassGrouping;
pub use self::subproblem::SubProblem;

use crate::core::{Result, SVMError, Sample, SampleSet};

/// Labeled dataset grouped by class
#[derive(Debug, Clone)]
pub struct SvmProblem {
    samples: Vec<Sample>,
    labels: Vec<i32>,
    grouping: ClassGrouping,
}

impl SvmProblem {
    /// Create a problem, grouping samples by label
    pub fn new(samples: Vec<Sample>, labels: Vec<i32>) -> Result<Self> {
        if samples.len() != labels.len() {
            return Err(SVMError::DimensionMismatch {
                expected: samples.len(),
                actual: labels.len(),
            });
        }

        let grouping = ClassGrouping::from_labels(&labels);
        Ok(Self {
            samples,
            labels,
            grouping,
        })
    }

    /// Class layout computed at construction
    pub fn grouping(&self) -> &ClassGrouping {
        &self.grouping
    }

    /// Number of distinct classes
    pub fn num_classes(&self) -> usize {
        self.grouping.num_classes()
    }

    /// Number of samples
    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    /// Largest one-based feature index in any sample
    pub fn num_features(&self) -> usize {
        self.samples
            .iter()
            .flat_map(|s| s.iter())
            .filter(|n| n.index > 0)
            .map(|n| n.index as usize)
            .max()
            .unwrap_or(0)
    }

    /// Samples of class `k`, in original order
    ///
    /// # Panics
    /// Panics if `k >= num_classes()`
    pub fn class_samples(&self, k: usize) -> impl Iterator<Item = &Sample> + '_ {
        self.grouping
            .class_members(k)
            .iter()
            .map(move |&i| &self.samples[i])
    }

    /// Split back into samples and labels
    pub fn into_parts(self) -> (Vec<Sample>, Vec<i32>) {
        (self.samples, self.labels)
    }
}

impl SampleSet for SvmProblem {
    fn samples(&self) -> &[Sample] {
        &self.samples
    }

    fn labels(&self) -> &[i32] {
        &self.labels
    }
}
