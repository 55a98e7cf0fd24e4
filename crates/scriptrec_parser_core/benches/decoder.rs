use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use scriptrec_parser_core::{EventSink, TerminalEvent, TypescriptParser};

struct NullSink;

impl EventSink for NullSink {
    #[inline]
    fn text(&mut self, _bytes: &[u8]) { /* discard */
    }

    #[inline]
    fn event(&mut self, _event: TerminalEvent<'_>) { /* discard */
    }
}

fn make_synthetic_inputs() -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    // 1. Plain shell output with occasional line breaks
    let mut text_heavy = Vec::new();
    for i in 0..1000 {
        text_heavy.extend_from_slice(b"drwxr-xr-x 2 user user 4096 entry-");
        text_heavy.extend_from_slice(i.to_string().as_bytes());
        text_heavy.extend_from_slice(b"\r\n");
    }

    // 2. Cursor-movement heavy (full-screen application redraw)
    let mut csi_heavy = Vec::new();
    for row in 1..=50 {
        for column in 1..=80 {
            csi_heavy.extend_from_slice(format!("\x1b[{row};{column}H*").as_bytes());
        }
    }

    // 3. Colorized output (two-digit SGR codes as script(1) records them)
    let mut color_heavy = Vec::new();
    for i in 0..1000 {
        color_heavy.extend_from_slice(b"\x1b[00;32mok\x1b[00m item ");
        color_heavy.extend_from_slice(i.to_string().as_bytes());
        color_heavy.extend_from_slice(b"\x1b[01;31m!\x1b[00m\n");
    }

    (text_heavy, csi_heavy, color_heavy)
}

fn bench_decoder(c: &mut Criterion) {
    let (text_heavy, csi_heavy, color_heavy) = make_synthetic_inputs();

    let mut group = c.benchmark_group("decoder");

    group.throughput(Throughput::Bytes(text_heavy.len() as u64));
    group.bench_function("text_heavy", |b| {
        b.iter(|| {
            let mut parser = TypescriptParser::new();
            let mut sink = NullSink;
            parser.parse(black_box(&text_heavy), &mut sink);
        });
    });

    group.throughput(Throughput::Bytes(csi_heavy.len() as u64));
    group.bench_function("csi_heavy", |b| {
        b.iter(|| {
            let mut parser = TypescriptParser::new();
            let mut sink = NullSink;
            parser.parse(black_box(&csi_heavy), &mut sink);
        });
    });

    group.throughput(Throughput::Bytes(color_heavy.len() as u64));
    group.bench_function("color_heavy", |b| {
        b.iter(|| {
            let mut parser = TypescriptParser::new();
            let mut sink = NullSink;
            parser.parse(black_box(&color_heavy), &mut sink);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_decoder);
criterion_main!(benches);
