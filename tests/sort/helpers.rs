use pipesort::{bootstrap_local, Endpoint, PipesortConfig, Value};
use std::sync::Arc;

/// Helper: run a closure on every rank of a local substrate concurrently.
/// Keeps all endpoints alive until every task completes.
pub async fn run_ranks<F, Fut, T>(world_size: u32, f: F) -> Vec<T>
where
    F: Fn(Arc<Endpoint>) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let config = PipesortConfig::default();
    let endpoints = bootstrap_local(world_size, &config).unwrap();

    let f = Arc::new(f);
    let mut handles = Vec::new();
    for endpoint in endpoints {
        let endpoint = Arc::new(endpoint);
        let f = Arc::clone(&f);
        handles.push(tokio::spawn(async move { f(endpoint).await }));
    }

    let mut results = Vec::new();
    for h in handles {
        results.push(h.await.unwrap());
    }
    results
}

pub fn is_sorted(values: &[Value]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

/// Assert the output is a permutation of the input.
pub fn assert_same_multiset(input: &[Value], output: &[Value]) {
    let mut a = input.to_vec();
    let mut b = output.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    assert_eq!(a, b, "output is not a permutation of the input");
}
