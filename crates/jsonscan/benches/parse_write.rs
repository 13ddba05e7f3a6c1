//! Benchmark – tree parsing, event scanning and writing
#![allow(missing_docs)]

use std::{fmt::Write, time::Duration};

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use jsonscan::{
    Lexer, ParserError, ScanContext, ScanHandler, Scanner, Value, WriterOptions, from_str,
    to_string_with,
};

/// A deterministic cost table with `rows * rows` numeric cells.
fn make_table(rows: usize) -> String {
    let mut s = String::from(r#"{"meta": {"vtag": {"tag": "bench"}}, "rows": {"#);
    for r in 0..rows {
        if r > 0 {
            s.push(',');
        }
        write!(s, "\"r{r}\": {{").unwrap();
        for c in 0..rows {
            if c > 0 {
                s.push(',');
            }
            write!(s, "\"c{c}\": {}.{}", r * c, (r + c) % 10).unwrap();
        }
        s.push('}');
    }
    s.push_str("}}");
    s
}

/// Sums every number without building a tree.
#[derive(Default)]
struct Sum(f64);

impl ScanHandler for Sum {
    fn got_dictionary_value(&mut self, _ctx: &ScanContext, value: Value) -> Result<(), ParserError> {
        self.0 += value.as_f64().unwrap_or(0.0);
        Ok(())
    }
}

fn bench_parse_vs_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_vs_scan");
    for &rows in &[10usize, 100, 300] {
        let payload = make_table(rows);
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse", rows), &payload, |b, p| {
            b.iter(|| black_box(from_str(black_box(p)).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("scan", rows), &payload, |b, p| {
            b.iter(|| {
                let mut sum = Sum::default();
                Scanner::default()
                    .scan(&mut Lexer::from_str(black_box(p)), &mut sum)
                    .unwrap();
                black_box(sum.0)
            });
        });
        group.bench_with_input(BenchmarkId::new("reader", rows), &payload, |b, p| {
            b.iter(|| black_box(jsonscan::from_reader(black_box(p.as_bytes())).unwrap()));
        });
    }
    group.finish();
}

fn bench_write(c: &mut Criterion) {
    let value = from_str(&make_table(100)).unwrap();
    let mut group = c.benchmark_group("write");
    for (name, options) in [("compact", WriterOptions::compact()), ("neat", WriterOptions::neat())] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &options, |b, o| {
            b.iter(|| black_box(to_string_with(black_box(&value), o.clone()).unwrap()));
        });
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_parse_vs_scan, bench_write }
criterion_main!(benches);
