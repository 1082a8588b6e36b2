mod cancellation;

use criterion::Criterion;

/// Register all order book benchmarks.
pub fn register_benchmarks(c: &mut Criterion) {
    matching::register_benchmarks(c);
    cancellation::register_benchmarks(c);
}
