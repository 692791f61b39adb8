use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use csvtable::Table;

fn make_input(rows: usize) -> String {
    let mut text = String::with_capacity(rows * 32);
    for i in 0..rows {
        text.push_str(&format!("{}, Name_{}, {}.5\n", i, i, i * 100));
    }
    text
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [100, 1000, 10000, 100000].iter() {
        let input = make_input(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| {
                let table: Table = black_box(input.as_str()).parse().unwrap();
                black_box(table.row_count());
            });
        });
    }

    group.finish();
}

fn benchmark_convert(c: &mut Criterion) {
    let table: Table = make_input(10000).parse().unwrap();

    c.bench_function("column_as_f64", |b| {
        b.iter(|| black_box(table.column_as::<f64>(2).unwrap()));
    });

    c.bench_function("get_i64", |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for row in 0..table.row_count() {
                sum += table.get::<i64>(row, 0).unwrap();
            }
            black_box(sum)
        });
    });
}

criterion_group!(benches, benchmark_parse, benchmark_convert);
criterion_main!(benches);
