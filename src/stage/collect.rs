//! Collection stage: funnels every rank's final held value back to the root.

use crate::collective::gather;
use crate::config::PipesortConfig;
use crate::error::Result;
use crate::topology::ChainTopology;
use crate::transport::Endpoint;
use crate::types::{Value, ROOT_RANK};

/// Run the collection stage for one rank, once its held value is final.
///
/// Returns the assembled sequence at the collection root (rank 0), `None`
/// elsewhere. By the pipeline invariant the sequence, ordered by rank, is
/// sorted ascending.
pub async fn run_collection(
    endpoint: &Endpoint,
    topology: &ChainTopology,
    held: Value,
    config: &PipesortConfig,
) -> Result<Option<Vec<Value>>> {
    let out = gather(endpoint, held, ROOT_RANK, config.collective_timeout).await?;
    if let Some(ref sequence) = out {
        tracing::debug!(
            rank = topology.rank(),
            len = sequence.len(),
            "collection complete"
        );
    }
    Ok(out)
}
