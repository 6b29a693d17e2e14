use pipesort::{sort_values, PipesortConfig, PipesortError};

#[tokio::test]
async fn test_single_rank_holds_the_only_value() {
    // N=1: no pipeline messages are exchanged at all.
    let config = PipesortConfig::default();
    let sorted = sort_values(vec![42], &config).await.unwrap();
    assert_eq!(sorted, vec![42]);
}

#[tokio::test]
async fn test_two_ranks() {
    let config = PipesortConfig::default();
    let sorted = sort_values(vec![9, 1], &config).await.unwrap();
    assert_eq!(sorted, vec![1, 9]);
}

#[tokio::test]
async fn test_all_duplicates() {
    let config = PipesortConfig::default();
    let sorted = sort_values(vec![5, 5, 5], &config).await.unwrap();
    assert_eq!(sorted, vec![5, 5, 5]);
}

#[tokio::test]
async fn test_scenario_four_ranks() {
    // Raw sequence [7, 3, 9, 1]: the source's min-swap pins 1 at rank 0
    // and streams the multiset {3, 7, 9}; the pipeline re-derives full
    // order regardless of the streamed order.
    let config = PipesortConfig::default();
    let sorted = sort_values(vec![7, 3, 9, 1], &config).await.unwrap();
    assert_eq!(sorted, vec![1, 3, 7, 9]);
}

#[tokio::test]
async fn test_empty_input_is_a_configuration_error() {
    let config = PipesortConfig::default();
    let err = sort_values(vec![], &config).await.unwrap_err();
    assert!(matches!(
        err,
        PipesortError::InvalidWorldSize { world_size: 0 }
    ));
}

#[tokio::test]
async fn test_already_sorted_input() {
    let config = PipesortConfig::default();
    let input: Vec<_> = (0..8).collect();
    let sorted = sort_values(input.clone(), &config).await.unwrap();
    assert_eq!(sorted, input);
}

#[tokio::test]
async fn test_reverse_sorted_input() {
    let config = PipesortConfig::default();
    let input: Vec<_> = (0..8).rev().collect();
    let sorted = sort_values(input, &config).await.unwrap();
    assert_eq!(sorted, (0..8).collect::<Vec<_>>());
}
