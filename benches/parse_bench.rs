use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use heatsheet_matrix::{parse, Cell, Delimiter};

fn matrix_text(rows: usize, cols: usize) -> String {
    let mut text = String::new();
    for c in 0..cols {
        text.push(',');
        text.push_str(&format!("C{c}"));
    }
    text.push('\n');
    for r in 0..rows {
        text.push_str(&format!("R{r}"));
        for c in 0..cols {
            text.push_str(&format!(",{}.{c}", r * cols + c));
        }
        text.push('\n');
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10usize, 100, 500] {
        let text = matrix_text(size, size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse(black_box(text), Delimiter::Comma).unwrap());
        });
    }

    group.finish();
}

fn bench_cell_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("cell");

    group.bench_function("plain", |b| b.iter(|| Cell::parse(black_box("1234.5"))));
    group.bench_function("thousands", |b| {
        b.iter(|| Cell::parse(black_box("1,234,567.89")));
    });
    group.bench_function("missing", |b| b.iter(|| Cell::parse(black_box("n/a"))));

    group.finish();
}

fn bench_infer(c: &mut Criterion) {
    let text = matrix_text(50, 50);
    c.bench_function("infer_delimiter", |b| {
        b.iter(|| Delimiter::infer(black_box("matrix.txt"), black_box(&text)));
    });
}

criterion_group!(benches, bench_parse, bench_cell_parse, bench_infer);
criterion_main!(benches);
