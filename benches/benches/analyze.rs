//! Analyzer throughput on generated snippets.
//!
//! Run with: cargo bench -p pyprobe-bench --bench analyze

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pyprobe_analyze::{Analyzer, render_test_module};

/// A module with `count` functions and one class, mixing typed and untyped params.
fn sample_module(count: usize) -> String {
    let mut source = String::new();
    for idx in 0..count {
        source.push_str(&format!(
            r#"def process_{idx}(items: list, limit: int, label):
    """Process batch {idx}."""
    total = 0
    for item in items:
        if item > limit and label:
            total += item
        elif item < 0:
            continue
    return [t for t in range(total) if t % 2]

"#
        ));
    }
    source.push_str(
        r#"class Handler:
    def handle(self, request: str):
        try:
            return request.upper()
        except ValueError:
            return None
"#,
    );
    source
}

fn analyze_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    group.sample_size(20);

    let analyzer = Analyzer::new();
    for count in [1, 10, 100] {
        let source = sample_module(count);
        group.bench_with_input(BenchmarkId::new("functions", count), &source, |b, source| {
            b.iter(|| analyzer.analyze(source).unwrap());
        });
    }

    group.finish();
}

fn export_module(c: &mut Criterion) {
    let analysis = Analyzer::new().analyze(&sample_module(50)).unwrap();
    c.bench_function("render_test_module", |b| {
        b.iter(|| render_test_module(&analysis, "pytest"));
    });
}

criterion_group!(benches, analyze_sizes, export_module);
criterion_main!(benches);
