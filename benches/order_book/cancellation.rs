use criterion::{BenchmarkId, Criterion};
use orderbook_sim::{OrderBook, Side};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

/// Register benchmarks for the cancellation policy and metric queries.
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("OrderBook - Cancellation");

    for &(bid, ask) in &[(10u64, 10u64), (30, 10), (10, 30)] {
        group.bench_with_input(
            BenchmarkId::new("cancel_order", format!("{bid}x{ask}")),
            &(bid, ask),
            |b, &(bid, ask)| {
                let mut rng = ChaCha8Rng::seed_from_u64(1);
                b.iter_with_setup(
                    || {
                        let mut book = OrderBook::with_depth(100, 1, 5, 10);
                        book.add_limit_order(Side::Buy, 99, bid);
                        book.add_limit_order(Side::Sell, 101, ask);
                        book
                    },
                    |mut book| black_box(book.cancel_order(&mut rng)),
                );
            },
        );
    }

    let book = OrderBook::with_depth(100, 1, 50, 10);
    group.bench_function("snapshot", |b| {
        b.iter(|| black_box(book.snapshot(black_box(1), orderbook_sim::EventKind::CancelBid)))
    });

    group.finish();
}
