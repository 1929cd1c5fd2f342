//! File format adapters
//!
//! Adapters for the two inputs of an extraction: FASTA sequence and GFF/GTF annotation.

pub mod fasta;
pub mod gff;

pub use fasta::{extract_sequence, write_fasta, Extraction, ExtractionStats, FastaHeader};
pub use gff::{
    rebase_features, select_features, write_gff, GffPreamble, GffRecord, SelectOptions,
    Selection, SelectionStats,
};
