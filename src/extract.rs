//! Mini-chromosome extraction
//!
//! Ties the passes together: select annotation rows (possibly widening the
//! region), pad the region, extract the sequence with the padded region,
//! then rebase the selected rows onto it.

use crate::core::{create_output, open_input, AnnotationError, MiniChromError, Region, Result, SequenceError};
use crate::formats::fasta::{
    extract_sequence, write_fasta, ExtractionStats, FastaHeader, DEFAULT_LINE_WIDTH,
};
use crate::formats::gff::{
    rebase_features, select_features, write_gff, GffPreamble, GffRecord, SelectOptions,
    SelectionStats,
};
use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Extraction settings
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Requested region
    pub region: Region,
    /// Bases added on both sides after selection (negative shrinks)
    pub padding: i64,
    /// Widen the region to enclose every overlapping feature
    pub extend: bool,
    /// Output sequence name; the region's chromosome when `None`
    pub label: Option<String>,
    /// FASTA line width, 0 for a single line
    pub line_width: usize,
    /// Append region, padding and length to the FASTA header
    pub extended_header: bool,
}

impl ExtractOptions {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            padding: 0,
            extend: false,
            label: None,
            line_width: DEFAULT_LINE_WIDTH,
            extended_header: false,
        }
    }

    /// Name given to the output sequence and features
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.region.chrom)
    }
}

/// An extracted sequence with its rebased features
#[derive(Debug, Clone)]
pub struct MiniChromosome {
    /// Final region: selected, widened if requested, then padded
    pub region: Region,
    pub sequence: String,
    /// Features renumbered relative to `region.start`
    pub features: Vec<GffRecord>,
    pub selection: SelectionStats,
    pub extraction: ExtractionStats,
}

impl MiniChromosome {
    /// Run both passes over already opened inputs
    pub fn build<A: BufRead, S: BufRead>(
        annotation: A,
        sequence: S,
        options: &ExtractOptions,
    ) -> Result<Self> {
        let selection = select_features(
            annotation,
            &options.region,
            SelectOptions {
                extend: options.extend,
            },
        )?;
        let region = selection.region.padded(options.padding);

        let extraction = extract_sequence(sequence, &region)?;
        let features = rebase_features(selection.records, &region, options.label.as_deref());

        Ok(Self {
            region,
            sequence: extraction.sequence,
            features,
            selection: selection.stats,
            extraction: extraction.stats,
        })
    }
}

/// Output file locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub fasta: PathBuf,
    pub gff: PathBuf,
}

impl OutputPaths {
    /// `<prefix>.fa` and `<prefix>.gff`
    ///
    /// The suffix is appended rather than substituted, so a prefix such as
    /// `out/chr1.part` keeps its dot.
    pub fn from_prefix<P: AsRef<Path>>(prefix: P) -> Self {
        let with_suffix = |suffix: &str| {
            let mut path = OsString::from(prefix.as_ref().as_os_str());
            path.push(suffix);
            PathBuf::from(path)
        };
        Self {
            fasta: with_suffix(".fa"),
            gff: with_suffix(".gff"),
        }
    }
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct ExtractStats {
    pub region: Region,
    pub selection: SelectionStats,
    pub extraction: ExtractionStats,
    /// Bases written to the output FASTA
    pub bases: usize,
}

/// Extract a mini-chromosome from files and write both outputs
pub fn run(
    annotation: &Path,
    sequence: &Path,
    outputs: &OutputPaths,
    options: &ExtractOptions,
) -> Result<ExtractStats> {
    let annotation_reader = open_input(annotation).map_err(AnnotationError::from)?;
    let sequence_reader = open_input(sequence).map_err(SequenceError::from)?;
    let mini = MiniChromosome::build(annotation_reader, sequence_reader, options)?;

    write_outputs(&mini, annotation, outputs, options).map_err(MiniChromError::OutputWrite)?;

    Ok(ExtractStats {
        bases: mini.sequence.len(),
        region: mini.region,
        selection: mini.selection,
        extraction: mini.extraction,
    })
}

fn write_outputs(
    mini: &MiniChromosome,
    annotation: &Path,
    outputs: &OutputPaths,
    options: &ExtractOptions,
) -> std::io::Result<()> {
    let header = FastaHeader {
        label: options.label(),
        details: options
            .extended_header
            .then_some((&mini.region, options.padding)),
    };
    let mut fasta = create_output(&outputs.fasta)?;
    write_fasta(&mut fasta, &header, &mini.sequence, options.line_width)?;
    fasta.flush()?;

    let source = annotation
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_else(|| annotation.to_string_lossy());
    let preamble = GffPreamble {
        source: &source,
        region: &mini.region,
        padding: options.padding,
    };
    let mut gff = create_output(&outputs.gff)?;
    write_gff(&mut gff, &preamble, &mini.features)?;
    gff.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GFF: &str = "\
##gff-version 3
chr1\t.\tgene\t8\t22\t.\t+\t.\tID=g1
chr1\t.\texon\t15\t25\t.\t+\t.\tID=e1
chr2\t.\texon\t15\t25\t.\t+\t.\tID=x
";

    const FASTA: &str = ">chr1\nAAAAACCCCC\nGGGGGTTTTT\nACGTACGTAC\n>chr2\nNNNNNNNNNN\n";

    #[test]
    fn test_label_defaults_to_chromosome() {
        let mut options = ExtractOptions::new(Region::new("chr1", 1, 10));
        assert_eq!(options.label(), "chr1");
        options.label = Some("mini".to_string());
        assert_eq!(options.label(), "mini");
    }

    #[test]
    fn test_build_plain() {
        let options = ExtractOptions::new(Region::new("chr1", 10, 20));
        let mini = MiniChromosome::build(GFF.as_bytes(), FASTA.as_bytes(), &options).unwrap();

        assert_eq!(mini.region, Region::new("chr1", 10, 20));
        assert_eq!(mini.sequence, "CGGGGGTTTTT");
        assert_eq!(mini.features.len(), 2);
        assert_eq!((mini.features[0].start, mini.features[0].end), (-1, 13));
        assert_eq!((mini.features[1].start, mini.features[1].end), (6, 16));
    }

    #[test]
    fn test_build_extended_and_padded() {
        let mut options = ExtractOptions::new(Region::new("chr1", 10, 20));
        options.extend = true;
        options.padding = 2;
        options.label = Some("mini".to_string());
        let mini = MiniChromosome::build(GFF.as_bytes(), FASTA.as_bytes(), &options).unwrap();

        assert_eq!(mini.region, Region::new("chr1", 6, 27));
        assert_eq!(mini.sequence.len(), 22);
        assert_eq!(mini.features[0].to_line(), "mini\t.\tgene\t3\t17\t.\t+\t.\tID=g1");
        assert_eq!(mini.features[1].to_line(), "mini\t.\texon\t10\t20\t.\t+\t.\tID=e1");
    }

    #[test]
    fn test_build_padding_truncated_at_sequence_start() {
        let mut options = ExtractOptions::new(Region::new("chr1", 3, 6));
        options.padding = 5;
        let mini = MiniChromosome::build(GFF.as_bytes(), FASTA.as_bytes(), &options).unwrap();
        assert_eq!(mini.region, Region::new("chr1", -2, 11));
        assert_eq!(mini.sequence, "AAAAACCCCCG");
    }

    #[test]
    fn test_build_region_at_i64_max() {
        let mut options = ExtractOptions::new("chr1:1-9223372036854775807".parse().unwrap());
        options.padding = 1;
        let mini = MiniChromosome::build(GFF.as_bytes(), FASTA.as_bytes(), &options).unwrap();
        assert_eq!(mini.region, Region::new("chr1", 0, i64::MAX));
        assert_eq!(mini.sequence.len(), 30);
        assert_eq!((mini.features[0].start, mini.features[0].end), (9, 23));
    }

    #[test]
    fn test_build_feature_ending_at_i64_max() {
        let gff = "chr1\t.\texon\t15\t9223372036854775807\t.\t+\t.\tID=long\n";
        let mut options = ExtractOptions::new(Region::new("chr1", 10, 20));
        options.extend = true;
        options.padding = 1;
        let mini = MiniChromosome::build(gff.as_bytes(), FASTA.as_bytes(), &options).unwrap();
        assert_eq!(mini.region, Region::new("chr1", 9, i64::MAX));
        assert_eq!(mini.sequence, "CCGGGGGTTTTTACGTACGTAC");
        assert_eq!((mini.features[0].start, mini.features[0].end), (7, i64::MAX - 8));
    }

    #[test]
    fn test_build_rejects_bad_annotation() {
        let options = ExtractOptions::new(Region::new("chr1", 10, 20));
        let result = MiniChromosome::build("chr1\tx\n".as_bytes(), FASTA.as_bytes(), &options);
        assert!(matches!(result, Err(MiniChromError::AnnotationRead(_))));
    }

    #[test]
    fn test_output_paths_from_prefix() {
        let paths = OutputPaths::from_prefix("out/chr1.part");
        assert_eq!(paths.fasta, PathBuf::from("out/chr1.part.fa"));
        assert_eq!(paths.gff, PathBuf::from("out/chr1.part.gff"));
    }

    #[test]
    fn test_run_writes_both_outputs() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let gff_path = dir.path().join("genes.gff");
        let fasta_path = dir.path().join("genome.fa");
        std::fs::write(&gff_path, GFF)?;
        std::fs::write(&fasta_path, FASTA)?;

        let mut options = ExtractOptions::new("chr1:10-20".parse()?);
        options.line_width = 5;
        options.extended_header = true;
        let outputs = OutputPaths::from_prefix(dir.path().join("mini"));
        let stats = run(&gff_path, &fasta_path, &outputs, &options)?;

        assert_eq!(stats.bases, 11);
        assert_eq!(stats.selection.selected, 2);
        assert!(stats.extraction.found);

        let fasta = std::fs::read_to_string(&outputs.fasta)?;
        assert_eq!(
            fasta,
            ">chr1 region=chr1:10-20 padding=0 length=11\nCGGGG\nGTTTT\nT\n"
        );
        let gff = std::fs::read_to_string(&outputs.gff)?;
        assert!(gff.contains("# source: genes.gff\n"));
        assert!(gff.contains("chr1\t.\texon\t6\t16\t.\t+\t.\tID=e1\n"));
        Ok(())
    }

    #[test]
    fn test_run_missing_sequence_file() {
        let dir = tempfile::tempdir().unwrap();
        let gff_path = dir.path().join("genes.gff");
        std::fs::write(&gff_path, GFF).unwrap();

        let options = ExtractOptions::new(Region::new("chr1", 10, 20));
        let outputs = OutputPaths::from_prefix(dir.path().join("mini"));
        let result = run(&gff_path, &dir.path().join("missing.fa"), &outputs, &options);
        assert!(matches!(result, Err(MiniChromError::SequenceRead(SequenceError::Io(_)))));
    }
}
