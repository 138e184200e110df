//! Decoder benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tinyvt::core::CodePoint;
use tinyvt::parser::{Decoder, Instructee};

/// Sink that only counts printed characters
#[derive(Default)]
struct Count(usize);

impl Instructee for Count {
    fn write_char(&mut self, _code: CodePoint) {
        self.0 += 1;
    }
}

fn bench_decode(c: &mut Criterion, name: &str, input: &str) {
    let mut group = c.benchmark_group("decoder");
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function(name, |b| {
        b.iter(|| {
            let mut decoder = Decoder::new();
            let mut sink = Count::default();
            decoder.decode(black_box(input.as_bytes()), &mut sink);
            black_box(sink.0)
        })
    });

    group.finish();
}

fn bench_plain_text(c: &mut Criterion) {
    bench_decode(c, "plain_text", &"Hello, World! ".repeat(1000));
}

fn bench_csi_sequences(c: &mut Criterion) {
    bench_decode(c, "csi_sequences", &"\x1b[1;31mRed\x1b[0m \x1b[5;10H\x1b[2J".repeat(100));
}

fn bench_mixed(c: &mut Criterion) {
    let mixed = "Line 1: \x1b[32mOK\x1b[0m\r\nLine 2: \x1b[31mERROR\x1b[0m\r\n".repeat(500);
    bench_decode(c, "mixed_content", &mixed);
}

fn bench_utf8(c: &mut Criterion) {
    bench_decode(c, "utf8_content", &"Hello, 世界! 🎉 ".repeat(500));
}

fn bench_string_sequences(c: &mut Criterion) {
    let osc = "\x1b]0;some window title\x07text".repeat(500);
    bench_decode(c, "string_sequences", &osc);
}

criterion_group!(
    benches,
    bench_plain_text,
    bench_csi_sequences,
    bench_mixed,
    bench_utf8,
    bench_string_sequences
);
criterion_main!(benches);
