//! Performance benchmarks for MiniChrom
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mini_chrom::core::Region;
use mini_chrom::formats::fasta::extract_sequence;
use mini_chrom::formats::gff::{select_features, SelectOptions};

/// Synthetic FASTA: a decoy record followed by `chr1` of `len` bases at 60 per line
fn synthetic_fasta(len: usize) -> String {
    let bases = b"ACGT";
    let mut out = String::with_capacity(len + len / 60 + 64);
    out.push_str(">decoy\nNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNN\n>chr1 synthetic\n");
    for i in 0..len {
        out.push(bases[i % 4] as char);
        if (i + 1) % 60 == 0 {
            out.push('\n');
        }
    }
    out.push('\n');
    out
}

/// Synthetic GFF: `n` features of 500bp every 1000bp on chr1, interleaved with chr2
fn synthetic_gff(n: usize) -> String {
    let mut out = String::from("##gff-version 3\n");
    for i in 0..n {
        let start = i * 1000 + 1;
        out.push_str(&format!(
            "chr1\tbench\texon\t{}\t{}\t.\t+\t.\tID=e{}\n",
            start,
            start + 499,
            i
        ));
        out.push_str(&format!(
            "chr2\tbench\texon\t{}\t{}\t.\t-\t.\tID=x{}\n",
            start,
            start + 499,
            i
        ));
    }
    out
}

/// Benchmark sequence extraction for different region sizes
fn bench_extract_sequence(c: &mut Criterion) {
    let fasta = synthetic_fasta(5_000_000);
    let mut group = c.benchmark_group("extract_sequence");

    for size in [1_000i64, 100_000, 1_000_000] {
        let region = Region::new("chr1", 2_000_000, 2_000_000 + size - 1);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &region, |b, region| {
            b.iter(|| {
                let extraction = extract_sequence(black_box(fasta.as_bytes()), region).unwrap();
                black_box(extraction.sequence.len())
            })
        });
    }
    group.finish();
}

/// Benchmark annotation selection with and without extension
fn bench_select_features(c: &mut Criterion) {
    let gff = synthetic_gff(100_000);
    let region = Region::new("chr1", 40_000_000, 60_000_000);
    let mut group = c.benchmark_group("select_features");
    group.throughput(Throughput::Elements(200_000));

    for extend in [false, true] {
        group.bench_with_input(BenchmarkId::new("extend", extend), &extend, |b, &extend| {
            b.iter(|| {
                let selection =
                    select_features(black_box(gff.as_bytes()), &region, SelectOptions { extend })
                        .unwrap();
                black_box(selection.records.len())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extract_sequence, bench_select_features);
criterion_main!(benches);
