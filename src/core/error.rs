//! Error types for MiniChrom
//!
//! Defines all error types used throughout the library.

use thiserror::Error;

/// Main error type for MiniChrom operations
#[derive(Debug, Error)]
pub enum MiniChromError {
    /// Region string does not match `chrom:start-end`
    #[error("Invalid region: {0}")]
    InvalidRegionFormat(#[from] RegionParseError),

    /// Failure while scanning the annotation file
    #[error("Annotation read error: {0}")]
    AnnotationRead(#[from] AnnotationError),

    /// Failure while scanning the sequence file
    #[error("Sequence read error: {0}")]
    SequenceRead(#[from] SequenceError),

    /// Failure while writing an output file
    #[error("Failed to write output: {0}")]
    OutputWrite(std::io::Error),
}

/// Errors that can occur while parsing a region string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionParseError {
    /// Not of the form `chrom:start-end`
    #[error("expected chrom:start-end, got '{0}'")]
    InvalidFormat(String),
}

/// Errors that can occur while scanning an annotation (GFF/GTF) file
#[derive(Debug, Error)]
pub enum AnnotationError {
    /// Row has fewer columns than the chrom/start/end fields need
    #[error("Too few fields at line {line}: expected at least {expected}, found {found}")]
    TooFewFields {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Start or end column is not an integer
    #[error("Invalid {field} '{value}' at line {line}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// I/O error during scanning
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while scanning a sequence (FASTA) file
#[derive(Debug, Error)]
pub enum SequenceError {
    /// Header line without a record name
    #[error("Empty record name at line {line}")]
    EmptyRecordName { line: usize },

    /// I/O error during scanning
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for MiniChrom operations
pub type Result<T> = std::result::Result<T, MiniChromError>;

/// Result type alias for annotation scanning
pub type AnnotationResult<T> = std::result::Result<T, AnnotationError>;

/// Result type alias for sequence scanning
pub type SequenceResult<T> = std::result::Result<T, SequenceError>;
