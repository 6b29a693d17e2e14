//! Single-process orchestration of a full sorting run.

use crate::config::PipesortConfig;
use crate::error::{PipesortError, Result};
use crate::stage::{generate_values, run_collection, run_pipeline, run_source};
use crate::topology::ChainTopology;
use crate::transport::{bootstrap_local, Endpoint};
use crate::types::{Rank, Value, ROOT_RANK};

/// Sort `values` through the chain, one rank per value.
///
/// Builds the local substrate with `world_size == values.len()`, spawns one
/// task per rank (rank 0 runs the source stage, the others the pipeline
/// stage, everyone the collection stage), and returns the root's gathered
/// sequence: ascending, and a permutation of the input.
pub async fn sort_values(values: Vec<Value>, config: &PipesortConfig) -> Result<Vec<Value>> {
    let world_size = u32::try_from(values.len())
        .map_err(|_| PipesortError::InvalidWorldSize {
            world_size: u32::MAX,
        })?;
    if world_size == 0 {
        return Err(PipesortError::InvalidWorldSize { world_size });
    }

    let endpoints = bootstrap_local(world_size, config)?;

    let mut input = Some(values);
    let mut handles = Vec::with_capacity(endpoints.len());
    for endpoint in endpoints {
        let config = config.clone();
        let values = if endpoint.rank() == ROOT_RANK {
            input.take()
        } else {
            None
        };
        handles.push(tokio::spawn(run_rank(endpoint, values, config)));
    }

    let mut sorted = None;
    for (rank, handle) in handles.into_iter().enumerate() {
        let result = handle.await.map_err(|e| PipesortError::TaskFailed {
            rank: rank as Rank,
            reason: e.to_string(),
        })??;
        if let Some(sequence) = result {
            sorted = Some(sequence);
        }
    }

    sorted.ok_or_else(|| PipesortError::CollectiveFailed {
        operation: "gather",
        rank: ROOT_RANK,
        reason: "root produced no output sequence".into(),
    })
}

/// Generate a random input of `count` values and sort it.
///
/// Returns `(input, sorted)` so callers can display or verify both sides.
pub async fn sort_random(
    count: usize,
    config: &PipesortConfig,
) -> Result<(Vec<Value>, Vec<Value>)> {
    let input = generate_values(count, config.value_bound, config.seed)?;
    let sorted = sort_values(input.clone(), config).await?;
    Ok((input, sorted))
}

/// Entry point for one rank: its stages in chain order.
async fn run_rank(
    endpoint: Endpoint,
    input: Option<Vec<Value>>,
    config: PipesortConfig,
) -> Result<Option<Vec<Value>>> {
    let topology = ChainTopology::new(endpoint.rank(), endpoint.world_size())?;

    let held = match input {
        Some(values) => run_source(&endpoint, &topology, values).await?,
        None => run_pipeline(&endpoint, &topology).await?,
    };

    run_collection(&endpoint, &topology, held, &config).await
}
