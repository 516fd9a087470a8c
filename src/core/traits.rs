//! Core traits for labeled sample collections

use crate::core::{Sample, SvmNode};

/// Labeled collection of sentinel-terminated samples
pub trait SampleSet: Send + Sync {
    /// All samples, in dataset order
    fn samples(&self) -> &[Sample];

    /// Class label of every sample, parallel to `samples()`
    fn labels(&self) -> &[i32];

    /// Number of samples
    fn len(&self) -> usize {
        self.samples().len()
    }

    /// Get a single sample by index
    ///
    /// # Panics
    /// Panics if index >= len()
    fn get_sample(&self, i: usize) -> &[SvmNode] {
        &self.samples()[i]
    }

    /// Copy out several samples at once
    fn get_batch(&self, indices: &[usize]) -> Vec<Sample> {
        indices.iter().map(|&i| self.samples()[i].clone()).collect()
    }

    /// Check if the collection is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
