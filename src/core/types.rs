//! Core type definitions for sparse samples and preparation settings

/// One non-zero feature of a sample in libsvm node layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvmNode {
    /// One-based feature index, or -1 for the end-of-row sentinel
    pub index: i32,
    /// Feature value
    pub value: f64,
}

impl SvmNode {
    /// End-of-row marker terminating every sample
    pub const SENTINEL: SvmNode = SvmNode {
        index: -1,
        value: 0.0,
    };

    /// Create a new feature node
    pub fn new(index: i32, value: f64) -> Self {
        Self { index, value }
    }

    /// Check whether this node terminates a row
    pub fn is_sentinel(&self) -> bool {
        self.index == -1
    }
}

/// A sentinel-terminated list of feature nodes
pub type Sample = Vec<SvmNode>;

/// Build a sample from `(index, value)` pairs, appending the sentinel
pub fn sample_from_pairs(pairs: &[(i32, f64)]) -> Sample {
    pairs
        .iter()
        .map(|&(index, value)| SvmNode::new(index, value))
        .chain(std::iter::once(SvmNode::SENTINEL))
        .collect()
}

/// Feature nodes of a sample without its trailing sentinel
///
/// Returns `None` when the sample is not sentinel-terminated.
pub fn features_of(sample: &[SvmNode]) -> Option<&[SvmNode]> {
    match sample.split_last() {
        Some((last, features)) if last.is_sentinel() => Some(features),
        _ => None,
    }
}

/// Configuration for batch sub-problem extraction
#[derive(Debug, Clone)]
pub struct PrepConfig {
    /// Extract class pairs on the rayon pool (needs the `parallel` feature)
    pub parallel: bool,
    /// Smallest number of class pairs worth dispatching in parallel
    pub min_parallel_pairs: usize,
}

impl PrepConfig {
    /// Enable or disable parallel extraction
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the pair-count threshold for parallel extraction
    pub fn with_min_parallel_pairs(mut self, min_parallel_pairs: usize) -> Self {
        self.min_parallel_pairs = min_parallel_pairs;
        self
    }
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            min_parallel_pairs: 4,
        }
    }
}
