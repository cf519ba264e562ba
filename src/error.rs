//! Error handling for profile operations
//!
//! This module re-exports the error type used throughout the crate. Header
//! reads and decompression propagate errors; heuristic scans never do, an
//! absent match is a normal outcome.

pub use crate::common::Result;
pub use crate::common::VapError;
