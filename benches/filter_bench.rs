use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use linesift::{filter_stream, FilterOptions, Trie};

fn keywords(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("kw{i:07}")).collect()
}

/// ~1 MiB of 80-byte lines; every eighth line carries a keyword.
fn corpus(keywords: &[String]) -> Vec<u8> {
    let mut input = Vec::with_capacity(1 << 20);
    let mut i = 0usize;
    while input.len() < 1 << 20 {
        let mut line = format!("line {i:08} ................................................");
        if i % 8 == 0 {
            line.push_str(&keywords[i % keywords.len()]);
        }
        line.push('\n');
        input.extend_from_slice(line.as_bytes());
        i += 1;
    }
    input
}

fn bench_trie_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("trie_build");
    for count in [10_000usize, 100_000] {
        let keywords = keywords(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &keywords, |b, kws| {
            b.iter(|| Trie::build_from_keywords(kws.iter(), false).unwrap());
        });
    }
    group.finish();
}

fn bench_suffix_scan(c: &mut Criterion) {
    let keywords = keywords(100_000);
    let trie = Trie::build_from_keywords(keywords.iter(), false).unwrap();
    let hit = b"padding padding padding kw0042000 padding padding padding padding";
    let miss = b"padding padding padding padding padding padding padding padding";

    c.bench_function("contains_anywhere/hit", |b| {
        b.iter(|| black_box(trie.contains_anywhere(black_box(hit))));
    });
    c.bench_function("contains_anywhere/miss", |b| {
        b.iter(|| black_box(trie.contains_anywhere(black_box(miss))));
    });
}

fn bench_filter_stream(c: &mut Criterion) {
    let keywords = keywords(100_000);
    let trie = Trie::build_from_keywords(keywords.iter(), false).unwrap();
    let input = corpus(&keywords);
    let options = FilterOptions::default();

    let mut group = c.benchmark_group("filter_stream");
    group.throughput(criterion::Throughput::Bytes(input.len() as u64));
    group.bench_function("1MiB", |b| {
        b.iter(|| {
            let mut output = Vec::with_capacity(input.len() / 4);
            filter_stream(&input[..], &mut output, &trie, &options, None).unwrap();
            black_box(output)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_trie_build, bench_suffix_scan, bench_filter_stream);
criterion_main!(benches);
