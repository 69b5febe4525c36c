//! Performance benchmarks for seqidx
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const BASES: &[u8] = b"ACGT";

/// Create a record file with `n` records and its sidecar index
fn create_benchmark_fixtures(n: usize) -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("bench.fasta");
    let index = temp_dir.path().join("bench.fasta.idx");

    let mut content = String::new();
    for i in 0..n {
        content.push_str(&format!(
            ">NR_{:06}.1 Synthetic organism {} strain BENCH-{} 16S ribosomal RNA\n",
            i,
            i % 97,
            i
        ));
        let body: String = (0..1400)
            .map(|j| BASES[(i * 7 + j * 13 + j / 5) % BASES.len()] as char)
            .collect();
        content.push_str(&body);
        content.push('\n');
    }
    fs::write(&path, content).expect("Failed to write fixture");

    seqidx::index::build::build_index_file(&path, &index, true).expect("Failed to build index");

    (temp_dir, path, index)
}

fn bench_validation(c: &mut Criterion) {
    let header = ">NR_118889.1 Amycolatopsis azurea strain NRRL 11412 16S ribosomal RNA";
    let ids = format!("{} {}", header, "NR_041263.1 ".repeat(10));

    c.bench_function("is_header_line", |b| {
        b.iter(|| seqidx::utils::is_header_line(black_box(header)))
    });
    c.bench_function("extract_identifiers", |b| {
        b.iter(|| seqidx::utils::extract_identifiers(black_box(&ids)))
    });
}

fn bench_open(c: &mut Criterion) {
    let mut group = c.benchmark_group("open");
    for n in [100, 1000] {
        let (_temp_dir, path, _) = create_benchmark_fixtures(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &path, |b, path| {
            b.iter(|| seqidx::store::RecordStore::open(black_box(path)))
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let (_temp_dir, path, index) = create_benchmark_fixtures(1000);
    let mut store = seqidx::store::RecordStore::open(&path).expect("Failed to open store");
    store.set_index_file(&index).expect("Failed to load index");

    let mut group = c.benchmark_group("lookup");

    group.bench_function("sequential_last", |b| {
        b.iter(|| store.get_by_id(black_box("NR_000999.1"), false))
    });

    group.bench_function("indexed_last", |b| {
        b.iter(|| store.get_by_id(black_box("NR_000999.1"), true))
    });

    group.bench_function("line_range_middle", |b| {
        b.iter(|| store.get_by_line_range(black_box(1001), 5))
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let (_temp_dir, path, _) = create_benchmark_fixtures(1000);
    let mut store = seqidx::store::RecordStore::open(&path).expect("Failed to open store");

    let mut group = c.benchmark_group("search");

    group.bench_function("composition_literal", |b| {
        b.iter(|| store.get_ids_by_composition(black_box("ACGTAC"), false))
    });

    group.bench_function("composition_wildcard", |b| {
        b.iter(|| store.get_ids_by_composition(black_box("ACG*TTA"), true))
    });

    group.bench_function("metadata", |b| {
        b.iter(|| store.get_ids_by_metadata(black_box("strain")))
    });

    group.finish();
}

fn bench_index_build(c: &mut Criterion) {
    let (_temp_dir, path, _) = create_benchmark_fixtures(1000);

    c.bench_function("index_build", |b| {
        b.iter(|| seqidx::index::build::build_entries(black_box(&path)))
    });
}

criterion_group!(
    benches,
    bench_validation,
    bench_open,
    bench_lookup,
    bench_search,
    bench_index_build,
);

criterion_main!(benches);
