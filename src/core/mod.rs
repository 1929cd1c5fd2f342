//! Core region algebra and shared plumbing
//!
//! This module contains the region value type, error types and the
//! input/output helpers used by the format adapters.

mod error;
pub mod io;
mod region;

pub use error::{
    AnnotationError, AnnotationResult, MiniChromError, RegionParseError, Result,
    SequenceError, SequenceResult,
};
pub use io::{create_output, open_input, CompressionFormat, LineIterator};
pub use region::Region;
