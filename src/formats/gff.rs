//! GFF/GTF annotation handling
//!
//! Selects the annotation rows overlapping a target region, rebases them
//! onto the extracted mini-chromosome and writes them back out.
//! GFF uses 1-based coordinates, closed interval [start, end].
//!
//! Rows are kept as raw tab-separated fields. Only seqname (column 1),
//! start (column 4) and end (column 5) are interpreted; every other column,
//! including trailing empty ones, is written back unchanged.

use crate::core::{AnnotationError, AnnotationResult, LineIterator, Region};
use chrono::{SecondsFormat, Utc};
use memchr::memchr;
use std::io::{self, BufRead, Write};

/// Columns that must be present: seqname, source, feature, start, end
pub const MIN_FIELDS: usize = 5;

const SEQNAME: usize = 0;
const START: usize = 3;
const END: usize = 4;

/// One annotation row with its parsed coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GffRecord {
    fields: Vec<String>,
    /// Start position (1-based)
    pub start: i64,
    /// End position (1-based, inclusive)
    pub end: i64,
}

impl GffRecord {
    /// Parse a tab-separated annotation line
    ///
    /// `line_number` is only used for error reporting.
    pub fn parse(line: &str, line_number: usize) -> AnnotationResult<Self> {
        let fields = split_tabs(line);
        if fields.len() < MIN_FIELDS {
            return Err(AnnotationError::TooFewFields {
                line: line_number,
                expected: MIN_FIELDS,
                found: fields.len(),
            });
        }

        let parse_coord = |idx: usize, field: &'static str| -> AnnotationResult<i64> {
            fields[idx].parse().map_err(|_| AnnotationError::InvalidNumber {
                line: line_number,
                field,
                value: fields[idx].to_string(),
            })
        };
        let start = parse_coord(START, "start")?;
        let end = parse_coord(END, "end")?;

        Ok(Self {
            fields: fields.into_iter().map(str::to_string).collect(),
            start,
            end,
        })
    }

    /// Sequence name (chromosome)
    pub fn seqname(&self) -> &str {
        &self.fields[SEQNAME]
    }

    /// All raw fields in column order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Region spanned by this feature
    pub fn region(&self) -> Region {
        Region::new(self.seqname(), self.start, self.end)
    }

    /// Tab-joined row as written to output
    pub fn to_line(&self) -> String {
        self.fields.join("\t")
    }

    /// Overwrite seqname, start and end in both parsed and raw form
    fn relocate(&mut self, seqname: &str, start: i64, end: i64) {
        self.fields[SEQNAME] = seqname.to_string();
        self.fields[START] = start.to_string();
        self.fields[END] = end.to_string();
        self.start = start;
        self.end = end;
    }
}

fn split_tabs(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut fields = Vec::with_capacity(9);
    let mut pos = 0;
    while let Some(tab) = memchr(b'\t', &bytes[pos..]) {
        fields.push(&line[pos..pos + tab]);
        pos += tab + 1;
    }
    fields.push(&line[pos..]);
    fields
}

/// Selection options
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectOptions {
    /// Grow the target region to enclose every selected feature
    pub extend: bool,
}

/// Counters collected during an annotation scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStats {
    /// Lines read, including comments
    pub lines: usize,
    /// Comment lines skipped
    pub comments: usize,
    /// Parsed rows on the target chromosome
    pub candidates: usize,
    /// Rows overlapping the target region
    pub selected: usize,
}

/// Result of an annotation scan
#[derive(Debug, Clone)]
pub struct Selection {
    /// Overlapping rows in file order
    pub records: Vec<GffRecord>,
    /// Input region, widened to enclose `records` when extension is on
    pub region: Region,
    pub stats: SelectionStats,
}

impl Selection {
    /// True when no row overlapped the input region
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Scan an annotation stream for rows overlapping `region`
///
/// Comment (`#`) and blank lines are skipped. Lines that do not begin with
/// the target chromosome name are skipped before parsing; this is a textual
/// prefix test, so `chr10` rows pass it for a `chr1` target. Those rows are
/// parsed and then dropped by an exact seqname check, so a malformed one is
/// still reported as an error.
pub fn select_features<R: BufRead>(
    reader: R,
    region: &Region,
    options: SelectOptions,
) -> AnnotationResult<Selection> {
    let mut lines = LineIterator::new(reader);
    let mut target = region.clone();
    let mut records = Vec::new();
    let mut stats = SelectionStats::default();

    while let Some(line) = lines.next_line() {
        let line = line?;
        stats.lines += 1;

        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            stats.comments += 1;
            continue;
        }
        if !line.starts_with(region.chrom.as_str()) {
            continue;
        }

        let record = GffRecord::parse(line, stats.lines)?;
        if record.seqname() != region.chrom {
            continue;
        }
        stats.candidates += 1;
        let feature = record.region();
        // Overlap is tested against the input region, not the widened one
        if feature.overlaps(region) {
            if options.extend {
                target.extend(&feature);
            }
            records.push(record);
        }
    }

    stats.selected = records.len();
    Ok(Selection {
        records,
        region: target,
        stats,
    })
}

/// Rebase features onto an output region
///
/// Each feature is renamed to `label` (its own seqname when `None`) and its
/// coordinates become 1-based offsets from `target.start`. Nothing is
/// clamped: a feature reaching past the region start gets a start of zero
/// or below. Coordinates saturate at the limits of `i64`.
///
/// # Examples
/// ```
/// use mini_chrom::core::Region;
/// use mini_chrom::formats::gff::{rebase_features, GffRecord};
///
/// let record = GffRecord::parse("chr1\t.\texon\t15\t25\t.\t+\t.\tID=e1", 1).unwrap();
/// let rebased = rebase_features(vec![record], &Region::new("chr1", 10, 30), Some("mini"));
/// assert_eq!(rebased[0].to_line(), "mini\t.\texon\t6\t16\t.\t+\t.\tID=e1");
/// ```
pub fn rebase_features(
    records: Vec<GffRecord>,
    target: &Region,
    label: Option<&str>,
) -> Vec<GffRecord> {
    let offset = target.start.saturating_sub(1);
    records
        .into_iter()
        .map(|mut record| {
            let seqname = label.unwrap_or(record.seqname()).to_string();
            let (start, end) = (
                record.start.saturating_sub(offset),
                record.end.saturating_sub(offset),
            );
            record.relocate(&seqname, start, end);
            record
        })
        .collect()
}

/// Provenance written at the top of an output GFF
#[derive(Debug, Clone)]
pub struct GffPreamble<'a> {
    /// Annotation file the rows came from
    pub source: &'a str,
    /// Final (padded) region
    pub region: &'a Region,
    /// Padding applied to the region
    pub padding: i64,
}

/// Write the preamble followed by the rows
pub fn write_gff<W: Write>(
    writer: &mut W,
    preamble: &GffPreamble,
    records: &[GffRecord],
) -> io::Result<()> {
    writeln!(writer, "##gff-version 3")?;
    writeln!(writer, "# source: {}", preamble.source)?;
    writeln!(writer, "# region: {}", preamble.region)?;
    writeln!(writer, "# padding: {}", preamble.padding)?;
    writeln!(
        writer,
        "# generated: {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    for record in records {
        writeln!(writer, "{}", record.to_line())?;
    }
    Ok(())
}
