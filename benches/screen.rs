//! Terminal and screen benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tinyvt::{Extent, Terminal};

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("terminal");

    let text = "The quick brown fox jumps over the lazy dog. ".repeat(200);
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("write_wrapping_text", |b| {
        let mut term = Terminal::new(Extent::new(80, 24)).unwrap();
        b.iter(|| {
            term.process_bytes(black_box(text.as_bytes()));
            term.clear_changes();
        })
    });

    group.finish();
}

fn bench_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("terminal");

    // Scroll cost should not depend on line width
    for width in [80, 320, 1280] {
        let lines = "line\r\n".repeat(1000);
        group.throughput(Throughput::Elements(1000));
        group.bench_with_input(BenchmarkId::new("scroll", width), &width, |b, &width| {
            let mut term = Terminal::new(Extent::new(width, 50)).unwrap();
            b.iter(|| {
                term.process_bytes(black_box(lines.as_bytes()));
                term.clear_changes();
            })
        });
    }

    group.finish();
}

fn bench_edit(c: &mut Criterion) {
    let mut group = c.benchmark_group("terminal");

    let edits = "\x1b[5;10H\x1b[3@abc\x1b[2P\x1b[4L\x1b[4M\x1b[K\x1b[1J".repeat(200);
    group.throughput(Throughput::Bytes(edits.len() as u64));

    group.bench_function("edit_sequences", |b| {
        let mut term = Terminal::new(Extent::new(80, 24)).unwrap();
        b.iter(|| {
            term.process_bytes(black_box(edits.as_bytes()));
            term.clear_changes();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_write, bench_scroll, bench_edit);
criterion_main!(benches);
