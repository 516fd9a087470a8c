//! Binary sub-problems for one-vs-one training

use super::SvmProblem;
use crate::core::{PrepConfig, Result, SVMError, Sample, SampleSet};
use log::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Two-class slice of a parent problem with labels remapped to +1/-1
///
/// Samples are copied out of the parent, so a sub-problem can be handed to a
/// solver and dropped independently of it.
#[derive(Debug, Clone)]
pub struct SubProblem {
    problem: SvmProblem,
    classes: (usize, usize),
    original_index: Vec<usize>,
    original_label: Vec<usize>,
}

impl SubProblem {
    /// Class indices `(positive, negative)` in the parent grouping
    pub fn classes(&self) -> (usize, usize) {
        self.classes
    }

    /// Binary problem with the positive class first
    pub fn problem(&self) -> &SvmProblem {
        &self.problem
    }

    /// Index of each sample in the parent problem
    pub fn original_index(&self) -> &[usize] {
        &self.original_index
    }

    /// Parent class index of each sample
    pub fn original_label(&self) -> &[usize] {
        &self.original_label
    }

    /// Number of positive (+1) samples
    pub fn num_positive(&self) -> usize {
        self.original_label
            .iter()
            .filter(|&&k| k == self.classes.0)
            .count()
    }

    /// Number of negative (-1) samples
    pub fn num_negative(&self) -> usize {
        self.len() - self.num_positive()
    }

    /// Take the binary problem, dropping provenance
    pub fn into_problem(self) -> SvmProblem {
        self.problem
    }
}

impl SampleSet for SubProblem {
    fn samples(&self) -> &[Sample] {
        self.problem.samples()
    }

    fn labels(&self) -> &[i32] {
        self.problem.labels()
    }
}

impl SvmProblem {
    /// Build the binary problem of class `i` (+1) against class `j` (-1)
    pub fn sub_problem(&self, i: usize, j: usize) -> Result<SubProblem> {
        let n_classes = self.num_classes();
        if i >= n_classes || j >= n_classes {
            return Err(SVMError::InvalidArgument(format!(
                "class pair ({i}, {j}) out of range for {n_classes} classes"
            )));
        }
        if i == j {
            return Err(SVMError::InvalidArgument(format!(
                "class pair ({i}, {j}) must name two different classes"
            )));
        }

        let grouping = self.grouping();
        let members_i = grouping.class_members(i);
        let members_j = grouping.class_members(j);
        let n = members_i.len() + members_j.len();

        let mut samples = Vec::with_capacity(n);
        let mut labels = Vec::with_capacity(n);
        let mut original_index = Vec::with_capacity(n);
        let mut original_label = Vec::with_capacity(n);

        for (members, class, y) in [(members_i, i, 1), (members_j, j, -1)] {
            for &idx in members {
                samples.push(self.samples()[idx].clone());
                labels.push(y);
                original_index.push(idx);
                original_label.push(class);
            }
        }

        trace!(
            "sub-problem ({i}, {j}): {} positive, {} negative",
            members_i.len(),
            members_j.len()
        );

        Ok(SubProblem {
            problem: SvmProblem::new(samples, labels)?,
            classes: (i, j),
            original_index,
            original_label,
        })
    }

    /// All one-vs-one class pairs `(i, j)` with `i < j`, in order
    pub fn class_pairs(&self) -> Vec<(usize, usize)> {
        let c = self.num_classes();
        (0..c)
            .flat_map(|i| ((i + 1)..c).map(move |j| (i, j)))
            .collect()
    }

    /// Extract every one-vs-one sub-problem with default settings
    pub fn sub_problems(&self) -> Result<Vec<SubProblem>> {
        self.sub_problems_with(&PrepConfig::default())
    }

    /// Extract every one-vs-one sub-problem
    ///
    /// Output follows `class_pairs()` order whether or not extraction runs in
    /// parallel.
    pub fn sub_problems_with(&self, config: &PrepConfig) -> Result<Vec<SubProblem>> {
        let pairs = self.class_pairs();
        debug!(
            "extracting {} sub-problems (parallel={})",
            pairs.len(),
            config.parallel
        );

        #[cfg(feature = "parallel")]
        {
            if config.parallel && pairs.len() >= config.min_parallel_pairs {
                return pairs
                    .par_iter()
                    .map(|&(i, j)| self.sub_problem(i, j))
                    .collect();
            }
        }

        pairs
            .iter()
            .map(|&(i, j)| self.sub_problem(i, j))
            .collect()
    }
}
