use crate::collective::helpers::{collective_recv, collective_send};
use crate::error::{PipesortError, Result};
use crate::protocol::PipesortMessage;
use crate::transport::Endpoint;
use crate::types::ROOT_RANK;
use std::time::Duration;

/// Barrier: blocks until all ranks reach this point.
///
/// Two-phase: every non-zero rank sends `Barrier { epoch }` to rank 0;
/// rank 0 collects one fence per rank, then releases everyone with
/// `BarrierAck { epoch }`. Epochs come from a per-endpoint counter that
/// advances in lockstep across ranks, so a stale fence from a previous
/// epoch is detected rather than silently absorbed.
pub async fn barrier(endpoint: &Endpoint, timeout: Duration) -> Result<()> {
    let world = endpoint.world_size();
    if world <= 1 {
        return Ok(());
    }

    let epoch = endpoint.next_barrier_epoch();
    let rank = endpoint.rank();

    if rank == ROOT_RANK {
        for r in 1..world {
            match collective_recv(endpoint, r, "barrier", timeout).await? {
                PipesortMessage::Barrier { epoch: e } if e == epoch => {}
                other => {
                    return Err(PipesortError::CollectiveFailed {
                        operation: "barrier",
                        rank: r,
                        reason: format!("expected Barrier(epoch={epoch}), got {other:?}"),
                    });
                }
            }
        }

        let ack = PipesortMessage::BarrierAck { epoch };
        for r in 1..world {
            collective_send(endpoint, r, &ack, "barrier", timeout).await?;
        }
    } else {
        let fence = PipesortMessage::Barrier { epoch };
        collective_send(endpoint, ROOT_RANK, &fence, "barrier", timeout).await?;

        match collective_recv(endpoint, ROOT_RANK, "barrier", timeout).await? {
            PipesortMessage::BarrierAck { epoch: e } if e == epoch => {}
            other => {
                return Err(PipesortError::CollectiveFailed {
                    operation: "barrier",
                    rank: ROOT_RANK,
                    reason: format!("expected BarrierAck(epoch={epoch}), got {other:?}"),
                });
            }
        }
    }

    Ok(())
}
