use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sel::cursor::{Columns, EagerColumns, LazyColumns, PatternColumns};
use sel::splitter::Splitter;

fn make_lines(count: usize, cols: usize) -> Vec<String> {
    (0..count)
        .map(|r| {
            (0..cols)
                .map(|c| "x".repeat(((r * 7 + c * 13) % 12) + 1))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn strategies() -> Vec<(&'static str, Box<dyn Columns>)> {
    let lazy: Box<dyn Columns> = Box::new(LazyColumns::new(" ", false).unwrap());
    let eager: Box<dyn Columns> =
        Box::new(EagerColumns::new(Splitter::literal(" ").unwrap(), false));
    let lazy_regex: Box<dyn Columns> = Box::new(PatternColumns::new(" +", false).unwrap());
    let eager_regex: Box<dyn Columns> =
        Box::new(EagerColumns::new(Splitter::pattern(" +").unwrap(), false));
    vec![
        ("lazy", lazy),
        ("eager", eager),
        ("lazy_regex", lazy_regex),
        ("eager_regex", eager_regex),
    ]
}

fn bench_first_column(c: &mut Criterion) {
    let lines = make_lines(10_000, 50);
    for (name, mut cols) in strategies() {
        c.bench_function(&format!("first_column_{name}_10kx50"), |b| {
            b.iter(|| {
                let mut total = 0;
                for line in &lines {
                    cols.reset(line);
                    total += cols.element_at(1).unwrap().len();
                }
                black_box(total)
            })
        });
    }
}

fn bench_last_column(c: &mut Criterion) {
    let lines = make_lines(10_000, 50);
    for (name, mut cols) in strategies() {
        c.bench_function(&format!("last_column_{name}_10kx50"), |b| {
            b.iter(|| {
                let mut total = 0;
                for line in &lines {
                    cols.reset(line);
                    total += cols.element_at(-1).unwrap().len();
                }
                black_box(total)
            })
        });
    }
}

fn bench_to_array(c: &mut Criterion) {
    let lines = make_lines(10_000, 50);
    for (name, mut cols) in strategies() {
        c.bench_function(&format!("to_array_{name}_10kx50"), |b| {
            b.iter(|| {
                let mut total = 0;
                for line in &lines {
                    cols.reset(line);
                    total += cols.to_array().len();
                }
                black_box(total)
            })
        });
    }
}

criterion_group!(benches, bench_first_column, bench_last_column, bench_to_array);
criterion_main!(benches);
