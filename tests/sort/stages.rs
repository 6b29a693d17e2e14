use super::helpers::run_ranks;
use pipesort::{
    run_collection, run_pipeline, run_source, ChainTopology, PipesortConfig, PipesortError,
    PipesortMessage, Value,
};

/// Drive the three stages by hand, without the orchestrator.
#[tokio::test]
async fn test_manual_stage_drive() {
    let results = run_ranks(4, |endpoint| async move {
        let topology = ChainTopology::new(endpoint.rank(), endpoint.world_size()).unwrap();
        let config = PipesortConfig::default();

        let held = if topology.is_source() {
            run_source(&endpoint, &topology, vec![7, 3, 9, 1])
                .await
                .unwrap()
        } else {
            run_pipeline(&endpoint, &topology).await.unwrap()
        };

        run_collection(&endpoint, &topology, held, &config)
            .await
            .unwrap()
    })
    .await;

    let root: Vec<Value> = results
        .into_iter()
        .flatten()
        .next()
        .expect("rank 0 must assemble the output");
    assert_eq!(root, vec![1, 3, 7, 9]);
}

/// A rank holds, in the end, the value at its own position of the sorted
/// order: the chain is a positional sort, not just a root-side one.
#[tokio::test]
async fn test_each_rank_holds_its_order_statistic() {
    let results = run_ranks(4, |endpoint| async move {
        let topology = ChainTopology::new(endpoint.rank(), endpoint.world_size()).unwrap();
        if topology.is_source() {
            run_source(&endpoint, &topology, vec![20, 0, 30, 10])
                .await
                .unwrap()
        } else {
            run_pipeline(&endpoint, &topology).await.unwrap()
        }
    })
    .await;

    assert_eq!(results, vec![0, 10, 20, 30]);
}

#[tokio::test]
async fn test_end_before_any_data_aborts_the_stage() {
    let results = run_ranks(2, |endpoint| async move {
        if endpoint.rank() == 0 {
            // A bare END means fewer values than ranks were injected.
            endpoint
                .send_message(1, &PipesortMessage::End)
                .await
                .unwrap();
            Ok(0)
        } else {
            let topology = ChainTopology::new(1, 2).unwrap();
            run_pipeline(&endpoint, &topology).await
        }
    })
    .await;

    assert!(matches!(
        results[1],
        Err(PipesortError::ProtocolViolation { rank: 1, .. })
    ));
}

#[tokio::test]
async fn test_stray_message_on_the_chain_link_aborts() {
    let results = run_ranks(2, |endpoint| async move {
        if endpoint.rank() == 0 {
            endpoint
                .send_message(1, &PipesortMessage::Barrier { epoch: 0 })
                .await
                .unwrap();
            Ok(0)
        } else {
            let topology = ChainTopology::new(1, 2).unwrap();
            run_pipeline(&endpoint, &topology).await
        }
    })
    .await;

    assert!(matches!(
        results[1],
        Err(PipesortError::ProtocolViolation { rank: 1, .. })
    ));
}
