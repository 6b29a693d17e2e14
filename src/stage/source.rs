//! Source stage: seeds the chain with the unsorted input.

use crate::error::{PipesortError, Result};
use crate::protocol::PipesortMessage;
use crate::topology::ChainTopology;
use crate::transport::Endpoint;
use crate::types::Value;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate `count` values drawn uniformly from `[0, bound)`.
///
/// The buffer is reserved up front so an allocation failure surfaces here,
/// before any message is sent.
pub fn generate_values(count: usize, bound: Value, seed: Option<u64>) -> Result<Vec<Value>> {
    if bound == 0 {
        return Err(PipesortError::InvalidValueBound);
    }

    let mut values: Vec<Value> = Vec::new();
    values.try_reserve_exact(count)?;

    match seed {
        Some(s) => {
            let mut rng = StdRng::seed_from_u64(s);
            for _ in 0..count {
                values.push(rng.gen_range(0..bound));
            }
        }
        None => {
            let mut rng = rand::thread_rng();
            for _ in 0..count {
                values.push(rng.gen_range(0..bound));
            }
        }
    }

    Ok(values)
}

/// Keep the running minimum of the input in slot 0.
///
/// One compare-and-swap pass of slot 0 against every later slot. The
/// pipeline downstream re-derives full order from any arrival sequence,
/// so this only shortens the first rank's work.
fn min_swap_pass(values: &mut [Value]) {
    for i in 1..values.len() {
        if values[0] > values[i] {
            values.swap(0, i);
        }
    }
}

/// Run the source stage on the chain head: local min-swap pass, then
/// stream the remainder downstream in array order, followed by the
/// end-of-stream marker. Returns the source's held value.
///
/// Sends are fire-and-forget; no acknowledgement is awaited. The input
/// must hold exactly one value per rank.
pub async fn run_source(
    endpoint: &Endpoint,
    topology: &ChainTopology,
    mut values: Vec<Value>,
) -> Result<Value> {
    if values.len() != topology.world_size() as usize {
        return Err(PipesortError::InputSizeMismatch {
            expected: topology.world_size() as usize,
            actual: values.len(),
        });
    }

    min_swap_pass(&mut values);
    let held = values[0];

    if let Some(downstream) = topology.downstream() {
        for &value in &values[1..] {
            let msg = PipesortMessage::Data {
                src_rank: topology.rank(),
                value,
            };
            endpoint.send_message(downstream, &msg).await?;
        }
        endpoint.send_message(downstream, &PipesortMessage::End).await?;
    }

    tracing::debug!(
        rank = topology.rank(),
        held,
        streamed = values.len() - 1,
        "source stage drained"
    );
    Ok(held)
}
