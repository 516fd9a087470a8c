//! Class discovery and class-contiguous sample ordering
//!
//! Classes are numbered by first occurrence in the label sequence. The one
//! exception is a binary set labeled `-1`/`+1` where `-1` shows up first: the
//! two classes are swapped so class 0 is always the `+1` class, which binary
//! solvers treat as positive.

use log::{debug, trace};

/// Class layout of a labeled dataset
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassGrouping {
    label: Vec<i32>,
    count: Vec<usize>,
    start: Vec<usize>,
    perm: Vec<usize>,
}

impl ClassGrouping {
    /// Group sample indices by class label
    pub fn from_labels(labels: &[i32]) -> Self {
        let mut label: Vec<i32> = Vec::new();
        let mut count: Vec<usize> = Vec::new();
        let mut group = Vec::with_capacity(labels.len());

        // Class counts stay small, a linear scan beats hashing here.
        for &y in labels {
            match label.iter().position(|&known| known == y) {
                Some(k) => {
                    count[k] += 1;
                    group.push(k);
                }
                None => {
                    group.push(label.len());
                    label.push(y);
                    count.push(1);
                }
            }
        }

        if label == [-1, 1] {
            trace!("swapping -1/+1 classes so +1 is class 0");
            label.swap(0, 1);
            count.swap(0, 1);
            for g in &mut group {
                *g = 1 - *g;
            }
        }

        let start: Vec<usize> = count
            .iter()
            .scan(0, |offset, &c| {
                let s = *offset;
                *offset += c;
                Some(s)
            })
            .collect();

        let mut next = start.clone();
        let mut perm = vec![0; labels.len()];
        for (i, &g) in group.iter().enumerate() {
            perm[next[g]] = i;
            next[g] += 1;
        }

        debug!(
            "grouped {} samples into {} classes",
            labels.len(),
            label.len()
        );

        Self {
            label,
            count,
            start,
            perm,
        }
    }

    /// Distinct class labels, in class-index order
    pub fn labels(&self) -> &[i32] {
        &self.label
    }

    /// Number of samples per class
    pub fn counts(&self) -> &[usize] {
        &self.count
    }

    /// Offset of each class block in `perm()`
    pub fn starts(&self) -> &[usize] {
        &self.start
    }

    /// Sample indices sorted by class, stable within each class
    pub fn perm(&self) -> &[usize] {
        &self.perm
    }

    /// Number of distinct classes
    pub fn num_classes(&self) -> usize {
        self.label.len()
    }

    /// Number of grouped samples
    pub fn num_samples(&self) -> usize {
        self.perm.len()
    }

    /// Class index of a label value, if present
    pub fn class_index(&self, label: i32) -> Option<usize> {
        self.label.iter().position(|&l| l == label)
    }

    /// Original sample indices belonging to class `k`
    ///
    /// # Panics
    /// Panics if `k >= num_classes()`
    pub fn class_members(&self, k: usize) -> &[usize] {
        let s = self.start[k];
        &self.perm[s..s + self.count[k]]
    }
}
