//! FASTA sequence handling
//!
//! Streams a multi-record, line-wrapped FASTA file once, front to back, and
//! pulls out the bases of a single target region. No index is used: the
//! scan walks past other records and stops as soon as it moves beyond the
//! end of the target.

use crate::core::{LineIterator, Region, SequenceError, SequenceResult};
use std::io::{self, BufRead, Write};

/// Record marker at the start of a header line
pub const HEADER_MARKER: char = '>';

/// Default output line width
pub const DEFAULT_LINE_WIDTH: usize = 60;

/// Counters collected during a sequence scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Lines read, headers included
    pub lines: usize,
    /// Header lines seen before the scan finished
    pub records: usize,
    /// Whether a record named after the target chromosome was seen
    pub found: bool,
}

/// Result of a sequence scan
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Bases overlapping the target, in file order
    pub sequence: String,
    pub stats: ExtractionStats,
}

/// Record name from a header line: first whitespace-delimited token after `>`
fn record_name(header: &str) -> &str {
    header[HEADER_MARKER.len_utf8()..]
        .split_whitespace()
        .next()
        .unwrap_or("")
}

/// Extract the bases of `target` from a FASTA stream
///
/// Every body line of the matching record moves a cursor region forward by
/// the line length; the part of the cursor inside `target` is cut from the
/// line and appended. A target chromosome missing from the file gives an
/// empty sequence, not an error.
///
/// # Examples
/// ```
/// use mini_chrom::core::Region;
/// use mini_chrom::formats::fasta::extract_sequence;
///
/// let fasta = ">chr1 test\nACGTA\nCCGGT\nTTTAA\n";
/// let extraction = extract_sequence(fasta.as_bytes(), &Region::new("chr1", 4, 12)).unwrap();
/// assert_eq!(extraction.sequence, "TACCGGTTT");
/// ```
pub fn extract_sequence<R: BufRead>(reader: R, target: &Region) -> SequenceResult<Extraction> {
    let mut lines = LineIterator::new(reader);
    let mut cursor: Option<Region> = None;
    let mut sequence = String::new();
    let mut stats = ExtractionStats::default();

    while let Some(line) = lines.next_line() {
        let line = line?;
        stats.lines += 1;

        if line.starts_with(HEADER_MARKER) {
            let name = record_name(line);
            if name.is_empty() {
                return Err(SequenceError::EmptyRecordName { line: stats.lines });
            }
            stats.records += 1;
            stats.found |= name == target.chrom;
            cursor = Some(Region::new(name, 0, 0));
            continue;
        }

        let current = match cursor.as_mut() {
            Some(current) if current.chrom == target.chrom => current,
            _ => continue,
        };
        if line.is_empty() {
            continue;
        }

        current.start = current.end.saturating_add(1);
        if current.start > target.end {
            break;
        }
        current.end = current.start.saturating_add(line.len() as i64 - 1);

        if let Some(overlap) = target.intersection(current) {
            sequence.push_str(overlap.translated(-current.start).mask_str(line));
        }
    }

    Ok(Extraction { sequence, stats })
}

/// Options for writing an output FASTA record
#[derive(Debug, Clone)]
pub struct FastaHeader<'a> {
    /// Record name
    pub label: &'a str,
    /// Region, padding and length appended to the header when set
    pub details: Option<(&'a Region, i64)>,
}

/// Write one FASTA record, wrapping the sequence at `line_width`
///
/// A width of 0 writes the whole sequence on one line.
pub fn write_fasta<W: Write>(
    writer: &mut W,
    header: &FastaHeader,
    sequence: &str,
    line_width: usize,
) -> io::Result<()> {
    match header.details {
        Some((region, padding)) => writeln!(
            writer,
            "{}{} region={} padding={} length={}",
            HEADER_MARKER,
            header.label,
            region,
            padding,
            sequence.len()
        )?,
        None => writeln!(writer, "{}{}", HEADER_MARKER, header.label)?,
    }

    if line_width == 0 {
        if !sequence.is_empty() {
            writeln!(writer, "{}", sequence)?;
        }
        return Ok(());
    }
    for chunk in sequence.as_bytes().chunks(line_width) {
        writer.write_all(chunk)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}
