//! Data loading
//!
//! Readers that turn on-disk datasets into [`SvmProblem`](crate::problem::SvmProblem)s.

pub mod libsvm;

pub use self::libsvm::*;
