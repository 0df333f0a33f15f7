use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sel::cursor::{Columns, LazyColumns};
use sel::operators::select_all;
use sel::parser::parse_queries;

fn make_lines(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("1 2 alpha b c d omega 3 4 5 6 7 8 9 line{}", i))
        .collect()
}

fn bench_queries(c: &mut Criterion, name: &str, queries: &[&str]) {
    let lines = make_lines(10_000);
    let queries = parse_queries(queries).unwrap();
    let mut cols = LazyColumns::new(" ", false).unwrap();
    let mut out: Vec<String> = Vec::new();

    c.bench_function(name, |b| {
        b.iter(|| {
            for line in &lines {
                out.clear();
                cols.reset(line);
                select_all(&queries, &mut cols, &mut out).unwrap();
            }
            black_box(out.len())
        })
    });
}

fn bench_select(c: &mut Criterion) {
    bench_queries(c, "select_index_10k", &["1", "-1"]);
    bench_queries(c, "select_range_10k", &["2:10:2"]);
    bench_queries(c, "select_reverse_10k", &["-1:1:-1"]);
    bench_queries(c, "select_switch_scan_10k", &["/alpha/:/omega/"]);
    bench_queries(c, "select_switch_around_10k", &["/omega/:-3"]);
}

criterion_group!(benches, bench_select);
criterion_main!(benches);
