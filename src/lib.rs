//! MiniChrom - extract a renumbered mini-chromosome
//!
//! Cuts a region out of a FASTA file together with the GFF/GTF features that
//! overlap it, and renumbers those features so they start at base 1 of the
//! extracted sequence.
//!
//! # Features
//!
//! - Single forward pass over each input, no index files needed
//! - Optional widening of the region to enclose every overlapping feature
//! - Symmetric padding around the final region
//! - Support for compressed inputs (gzip, bzip2)
//!
//! # Example
//!
//! ```
//! use mini_chrom::{ExtractOptions, MiniChromosome};
//!
//! let gff = "chr1\t.\texon\t15\t25\t.\t+\t.\tID=e1\n";
//! let fasta = ">chr1\nAAAAACCCCC\nGGGGGTTTTT\nACGTACGTAC\n";
//!
//! let mut options = ExtractOptions::new("chr1:10-20".parse().unwrap());
//! options.extend = true;
//! let mini = MiniChromosome::build(gff.as_bytes(), fasta.as_bytes(), &options).unwrap();
//!
//! assert_eq!(mini.region.to_string(), "chr1:10-25");
//! assert_eq!(mini.sequence, "CGGGGGTTTTTACGTA");
//! assert_eq!((mini.features[0].start, mini.features[0].end), (6, 16));
//! ```

pub mod core;
pub mod extract;
pub mod formats;

// Re-export commonly used types
pub use crate::core::{
    AnnotationError, MiniChromError, Region, RegionParseError, Result, SequenceError,
};
pub use extract::{run, ExtractOptions, ExtractStats, MiniChromosome, OutputPaths};
pub use formats::{fasta, gff};
