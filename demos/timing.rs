//! Wall-clock timing of the chain sort, fenced by barriers.
//!
//! Drives the stages by hand on a 64-rank chain: a barrier before the
//! clock starts, the full sort, and a barrier before it stops, so the
//! measurement at rank 0 covers every rank's work.
//!
//! ```bash
//! cargo run --example timing
//! ```

use pipesort::{
    barrier, bootstrap_local, generate_values, run_collection, run_pipeline, run_source,
    ChainTopology, PipesortConfig, PipesortError,
};
use std::time::Instant;

const WORLD_SIZE: u32 = 64;

#[tokio::main]
async fn main() -> pipesort::Result<()> {
    tracing_subscriber::fmt::init();

    let config = PipesortConfig::from_env();
    let input = generate_values(WORLD_SIZE as usize, config.value_bound, config.seed)?;
    let endpoints = bootstrap_local(WORLD_SIZE, &config)?;

    let mut handles = Vec::new();
    for endpoint in endpoints {
        let config = config.clone();
        let values = if endpoint.rank() == 0 {
            Some(input.clone())
        } else {
            None
        };

        handles.push(tokio::spawn(async move {
            let topology = ChainTopology::new(endpoint.rank(), endpoint.world_size())?;

            barrier(&endpoint, config.collective_timeout).await?;
            let start = Instant::now();

            let held = match values {
                Some(values) => run_source(&endpoint, &topology, values).await?,
                None => run_pipeline(&endpoint, &topology).await?,
            };
            let sorted = run_collection(&endpoint, &topology, held, &config).await?;

            barrier(&endpoint, config.collective_timeout).await?;

            if let Some(sorted) = sorted {
                println!(
                    "sorted {} values across {} ranks in {:?}",
                    sorted.len(),
                    endpoint.world_size(),
                    start.elapsed()
                );
            }
            Ok::<(), PipesortError>(())
        }));
    }

    for (rank, handle) in handles.into_iter().enumerate() {
        handle
            .await
            .map_err(|e| PipesortError::TaskFailed {
                rank: rank as u32,
                reason: e.to_string(),
            })??;
    }

    Ok(())
}
