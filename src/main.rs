//! MiniChrom CLI entry point
//!
//! Extracts a region from paired FASTA and GFF files as a renumbered mini-chromosome.

use anyhow::Context;
use clap::Parser;
use log::{debug, info, warn, LevelFilter};
use mini_chrom::fasta::DEFAULT_LINE_WIDTH;
use mini_chrom::{ExtractOptions, MiniChromError, OutputPaths, Region};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "mini-chrom")]
#[command(about = "Extract a renumbered mini-chromosome from paired FASTA and GFF files")]
#[command(version)]
#[command(author = "MiniChrom Contributors")]
struct Cli {
    /// Region to extract, 1-based inclusive (chrom:start-end)
    region: String,
    /// Input GFF/GTF annotation file (plain, .gz or .bz2)
    #[arg(short = 'a', long)]
    annotation: PathBuf,
    /// Input FASTA sequence file (plain, .gz or .bz2)
    #[arg(short = 's', long)]
    sequence: PathBuf,
    /// Bases added to both ends of the region (negative shrinks it)
    #[arg(short = 'p', long, default_value = "0", allow_hyphen_values = true)]
    padding: i64,
    /// Widen the region to enclose every overlapping feature
    #[arg(short = 'e', long)]
    extend: bool,
    /// Name of the output sequence (default: the region's chromosome)
    #[arg(short = 'l', long)]
    label: Option<String>,
    /// Output prefix; writes <prefix>.fa and <prefix>.gff (default: the label)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
    /// FASTA line width, 0 for a single line
    #[arg(short = 'w', long = "line-width", default_value_t = DEFAULT_LINE_WIDTH)]
    line_width: usize,
    /// Append region, padding and length to the FASTA header
    #[arg(long = "extended-header")]
    extended_header: bool,
    /// Show debug messages
    #[arg(short = 'v', long, conflicts_with = "quiet")]
    verbose: bool,
    /// Only show warnings and errors
    #[arg(short = 'q', long)]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Warn
        } else {
            LevelFilter::Info
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();
    let start = Instant::now();

    let region = cli.region.parse::<Region>().map_err(MiniChromError::from)?;

    let options = ExtractOptions {
        region,
        padding: cli.padding,
        extend: cli.extend,
        label: cli.label,
        line_width: cli.line_width,
        extended_header: cli.extended_header,
    };
    let prefix = cli
        .output
        .unwrap_or_else(|| PathBuf::from(options.label()));
    let outputs = OutputPaths::from_prefix(&prefix);

    info!("Extracting {} (padding={}, extend={})", options.region, options.padding, options.extend);
    debug!("Annotation: {:?}", cli.annotation);
    debug!("Sequence:   {:?}", cli.sequence);

    let stats = mini_chrom::run(&cli.annotation, &cli.sequence, &outputs, &options)
        .context("Extraction failed")?;

    if stats.selection.selected == 0 {
        warn!("No annotation rows overlap {}", options.region);
    }
    if !stats.extraction.found {
        warn!("Chromosome {} not found in {:?}", options.region.chrom, cli.sequence);
    } else if stats.bases == 0 {
        warn!("Region {} lies outside the sequence of {}", stats.region, options.region.chrom);
    }
    info!("Wrote {:?} and {:?}", outputs.fasta, outputs.gff);

    eprintln!("\n=== Extraction Statistics ===");
    eprintln!("Final region:      {}", stats.region);
    eprintln!("Annotation lines:  {}", stats.selection.lines);
    eprintln!("Comment lines:     {}", stats.selection.comments);
    eprintln!("Candidate rows:    {}", stats.selection.candidates);
    eprintln!("Selected rows:     {}", stats.selection.selected);
    eprintln!("Sequence records:  {}", stats.extraction.records);
    eprintln!("Bases extracted:   {}", stats.bases);
    eprintln!("Time elapsed:      {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
