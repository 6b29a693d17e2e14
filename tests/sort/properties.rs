use super::helpers::{assert_same_multiset, is_sorted};
use pipesort::{generate_values, sort_values, PipesortConfig};
use std::time::Duration;

#[tokio::test]
async fn test_sorted_and_conserved_across_world_sizes() {
    let config = PipesortConfig::default();
    for n in 1..=16usize {
        let input = generate_values(n, 100, Some(n as u64)).unwrap();
        let sorted = sort_values(input.clone(), &config).await.unwrap();
        assert_eq!(sorted.len(), n, "length changed for n={n}");
        assert!(is_sorted(&sorted), "unsorted output for n={n}: {sorted:?}");
        assert_same_multiset(&input, &sorted);
    }
}

#[tokio::test]
async fn test_narrow_value_range_heavy_duplicates() {
    let config = PipesortConfig::default();
    let input = generate_values(64, 4, Some(3)).unwrap();
    let sorted = sort_values(input.clone(), &config).await.unwrap();
    assert!(is_sorted(&sorted));
    assert_same_multiset(&input, &sorted);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_medium_chain() {
    let config = PipesortConfig::default();
    let input = generate_values(128, 100, Some(11)).unwrap();
    let sorted = sort_values(input.clone(), &config).await.unwrap();
    assert!(is_sorted(&sorted));
    assert_same_multiset(&input, &sorted);
}

/// Stress: 1000 ranks, uniform random input in [0, 100). The outer
/// deadline doubles as the termination check: the END cascade must
/// reach the tail and the gather must converge well within it.
#[tokio::test(flavor = "multi_thread")]
async fn test_stress_thousand_ranks() {
    let config = PipesortConfig::default();
    let input = generate_values(1000, 100, Some(99)).unwrap();

    let sorted = tokio::time::timeout(
        Duration::from_secs(120),
        sort_values(input.clone(), &config),
    )
    .await
    .expect("run did not terminate in time")
    .unwrap();

    assert!(is_sorted(&sorted));
    assert_same_multiset(&input, &sorted);
}
