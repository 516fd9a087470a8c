//! LibSVM format reader
//!
//! Reads multi-class datasets in the libsvm format:
//! label index:value index:value ...
//!
//! Example:
//! 3 1:0.5 3:1.2 7:0.8
//! 1 2:0.3 5:2.1
//!
//! Labels must be integral. Feature indices stay one-based and every sample
//! is terminated with a sentinel node.

use crate::core::{Result, SVMError, Sample, SampleSet, SvmNode};
use crate::problem::SvmProblem;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Samples and labels as read from a libsvm file
#[derive(Debug, Clone)]
pub struct LibSVMDataset {
    samples: Vec<Sample>,
    labels: Vec<i32>,
    dimensions: usize,
}

impl LibSVMDataset {
    /// Load a dataset from a LibSVM format file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(SVMError::IoError)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Load a dataset from a reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut samples = Vec::new();
        let mut labels = Vec::new();
        let mut dimensions = 0;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(SVMError::IoError)?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (label, sample, max_idx) = Self::parse_line(line).map_err(|e| {
                SVMError::ParseError(format!("Error parsing line {}: {}", line_num + 1, e))
            })?;
            labels.push(label);
            samples.push(sample);
            dimensions = dimensions.max(max_idx);
        }

        if samples.is_empty() {
            return Err(SVMError::EmptyDataset);
        }

        Ok(LibSVMDataset {
            samples,
            labels,
            dimensions,
        })
    }

    /// Number of features, i.e. the largest one-based index seen
    pub fn dim(&self) -> usize {
        self.dimensions
    }

    /// Group the dataset into a problem
    pub fn into_problem(self) -> Result<SvmProblem> {
        SvmProblem::new(self.samples, self.labels)
    }

    /// Parse a single line into label, sample and largest feature index
    fn parse_line(line: &str) -> Result<(i32, Sample, usize)> {
        let mut parts = line.split_whitespace();
        let label_str = parts
            .next()
            .ok_or_else(|| SVMError::ParseError("Empty line".to_string()))?;
        let label = parse_label(label_str)?;

        let mut sample = Vec::new();
        let mut max_index = 0;

        for feature_str in parts {
            let (index_str, value_str) = feature_str.split_once(':').ok_or_else(|| {
                SVMError::ParseError(format!("Invalid feature format: {feature_str}"))
            })?;

            let index = index_str.parse::<i32>().map_err(|_| {
                SVMError::ParseError(format!("Invalid feature index: {index_str}"))
            })?;
            if index < 1 {
                return Err(SVMError::ParseError(format!(
                    "Feature index must be positive: {index}"
                )));
            }

            let value = value_str.parse::<f64>().map_err(|_| {
                SVMError::ParseError(format!("Invalid feature value: {value_str}"))
            })?;

            sample.push(SvmNode::new(index, value));
            max_index = max_index.max(index as usize);
        }
        sample.push(SvmNode::SENTINEL);

        Ok((label, sample, max_index))
    }
}

fn parse_label(s: &str) -> Result<i32> {
    if let Ok(label) = s.parse::<i32>() {
        return Ok(label);
    }

    let value = s
        .parse::<f64>()
        .map_err(|_| SVMError::ParseError(format!("Invalid label: {s}")))?;
    if value.fract() != 0.0 || value < i32::MIN as f64 || value > i32::MAX as f64 {
        return Err(SVMError::ParseError(format!("Label must be an integer: {s}")));
    }
    Ok(value as i32)
}

impl SampleSet for LibSVMDataset {
    fn samples(&self) -> &[Sample] {
        &self.samples
    }

    fn labels(&self) -> &[i32] {
        &self.labels
    }
}
