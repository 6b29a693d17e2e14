use crate::collective::helpers::{collective_recv, collective_send};
use crate::error::{PipesortError, Result};
use crate::protocol::PipesortMessage;
use crate::transport::Endpoint;
use crate::types::{Rank, Value};
use futures::future::try_join_all;
use std::time::Duration;

/// Gather: every rank contributes one value; the root assembles them into
/// a sequence ordered by rank ascending. Returns `Some` at the root, `None`
/// elsewhere.
///
/// Uses flat gather: the root posts all other receives concurrently,
/// non-root ranks send their contribution to the root. The root's own
/// value is placed without a message hop. The call does not complete at
/// the root until every contribution has arrived, so finishing it doubles
/// as a synchronization point.
pub async fn gather(
    endpoint: &Endpoint,
    value: Value,
    root: Rank,
    timeout: Duration,
) -> Result<Option<Vec<Value>>> {
    let world = endpoint.world_size();
    let rank = endpoint.rank();

    if root >= world {
        return Err(PipesortError::InvalidRank {
            rank: root,
            world_size: world,
        });
    }

    if world == 1 {
        return Ok(Some(vec![value]));
    }

    if rank == root {
        let futs: Vec<_> = (0..world)
            .filter(|&r| r != root)
            .map(|r| async move {
                match collective_recv(endpoint, r, "gather", timeout).await? {
                    PipesortMessage::Gather { src_rank, value } => {
                        if src_rank != r {
                            return Err(PipesortError::CollectiveFailed {
                                operation: "gather",
                                rank: r,
                                reason: format!(
                                    "contribution from rank {src_rank} arrived on the link from rank {r}"
                                ),
                            });
                        }
                        Ok((r, value))
                    }
                    other => Err(PipesortError::CollectiveFailed {
                        operation: "gather",
                        rank: r,
                        reason: format!("expected Gather, got {other:?}"),
                    }),
                }
            })
            .collect();

        let contributions = try_join_all(futs).await?;

        let mut out: Vec<Value> = vec![0; world as usize];
        out[root as usize] = value;
        for (r, v) in contributions {
            out[r as usize] = v;
        }
        Ok(Some(out))
    } else {
        let msg = PipesortMessage::Gather {
            src_rank: rank,
            value,
        };
        collective_send(endpoint, root, &msg, "gather", timeout).await?;
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipesortConfig;
    use crate::transport::bootstrap_local;
    use std::sync::Arc;

    async fn gather_world(world: u32) -> Vec<Value> {
        let config = PipesortConfig::default();
        let endpoints = bootstrap_local(world, &config).unwrap();
        let timeout = config.collective_timeout;

        let mut handles = Vec::new();
        for endpoint in endpoints {
            let endpoint = Arc::new(endpoint);
            handles.push(tokio::spawn(async move {
                // Contribution encodes the rank so ordering is observable.
                gather(&endpoint, endpoint.rank() * 10, 0, timeout).await
            }));
        }

        let mut out = None;
        for h in handles {
            if let Some(seq) = h.await.unwrap().unwrap() {
                out = Some(seq);
            }
        }
        out.expect("root must produce the gathered sequence")
    }

    #[tokio::test]
    async fn test_gather_single_rank() {
        let config = PipesortConfig::default();
        let endpoints = bootstrap_local(1, &config).unwrap();
        let out = gather(&endpoints[0], 7, 0, config.collective_timeout)
            .await
            .unwrap();
        assert_eq!(out, Some(vec![7]));
    }

    #[tokio::test]
    async fn test_gather_orders_by_rank() {
        assert_eq!(gather_world(4).await, vec![0, 10, 20, 30]);
    }

    #[tokio::test]
    async fn test_gather_two_ranks() {
        assert_eq!(gather_world(2).await, vec![0, 10]);
    }

    #[tokio::test]
    async fn test_gather_invalid_root() {
        let config = PipesortConfig::default();
        let endpoints = bootstrap_local(2, &config).unwrap();
        let err = gather(&endpoints[0], 1, 9, config.collective_timeout)
            .await
            .unwrap_err();
        assert!(matches!(err, PipesortError::InvalidRank { rank: 9, .. }));
    }

    #[tokio::test]
    async fn test_gather_rejects_wrong_message() {
        let config = PipesortConfig::default();
        let timeout = std::time::Duration::from_millis(500);
        let mut endpoints = bootstrap_local(2, &config).unwrap();
        let e1 = endpoints.pop().unwrap();
        let e0 = endpoints.pop().unwrap();

        let sender = tokio::spawn(async move {
            e1.send_message(0, &PipesortMessage::Barrier { epoch: 0 })
                .await
                .unwrap();
            e1
        });

        let err = gather(&e0, 5, 0, timeout).await.unwrap_err();
        assert!(matches!(
            err,
            PipesortError::CollectiveFailed {
                operation: "gather",
                ..
            }
        ));
        sender.await.unwrap();
    }
}
