//! Problem preparation for one-vs-one SVM training
//!
//! Groups a multi-class dataset by label, cuts out the binary sub-problem for
//! any pair of classes, and converts sentinel-terminated sparse samples into
//! CSR buffers for numeric kernels.

pub mod core;
pub mod csr;
pub mod data;
pub mod export;
pub mod problem;
pub mod utils;

// Re-export main types for convenience
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::core::{Result, SVMError};
pub use crate::csr::CsrMatrix;
pub use crate::data::LibSVMDataset;
pub use crate::export::CsrExport;
pub use crate::problem::{ClassGrouping, SubProblem, SvmProblem};
pub use crate::utils::SparseVectorStats;

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
