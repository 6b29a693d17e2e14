use crate::error::{PipesortError, Result};
use crate::protocol::{decode_message, encode_message, PipesortMessage};
use crate::types::Rank;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{mpsc, Mutex};

/// One rank's attachment to the in-process channel substrate.
///
/// Sending side: one bounded frame lane per linked remote rank. Receiving
/// side: the matching receiver halves, each behind a `Mutex` so concurrent
/// consumers (the pipeline loop, the gather fan-in) cannot race on a lane.
/// A lane delivers frames strictly in send order, which is the
/// FIFO-per-pair guarantee the chain protocol depends on. No ordering is promised across
/// different lanes.
pub struct Endpoint {
    rank: Rank,
    world_size: u32,
    senders: HashMap<Rank, mpsc::Sender<Vec<u8>>>,
    inboxes: HashMap<Rank, Mutex<mpsc::Receiver<Vec<u8>>>>,
    barrier_epoch: AtomicU64,
}

impl Endpoint {
    pub(crate) fn new(
        rank: Rank,
        world_size: u32,
        senders: HashMap<Rank, mpsc::Sender<Vec<u8>>>,
        inboxes: HashMap<Rank, mpsc::Receiver<Vec<u8>>>,
    ) -> Self {
        Self {
            rank,
            world_size,
            senders,
            inboxes: inboxes
                .into_iter()
                .map(|(r, rx)| (r, Mutex::new(rx)))
                .collect(),
            barrier_epoch: AtomicU64::new(0),
        }
    }

    /// This endpoint's rank (0-indexed).
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Total number of ranks in the substrate.
    pub fn world_size(&self) -> u32 {
        self.world_size
    }

    /// Send a message to a linked rank.
    ///
    /// Fire-and-forget from the protocol's perspective: the call resolves
    /// once the frame is accepted by the lane, not when the receiver reads
    /// it. Suspends only while the bounded lane is at capacity.
    pub async fn send_message(&self, dest: Rank, msg: &PipesortMessage) -> Result<()> {
        if dest >= self.world_size {
            return Err(PipesortError::InvalidRank {
                rank: dest,
                world_size: self.world_size,
            });
        }
        let tx = self
            .senders
            .get(&dest)
            .ok_or(PipesortError::UnknownPeer { rank: dest })?;
        let frame = encode_message(msg)?;
        tracing::trace!(src = self.rank, dest, tag = ?msg.tag(), "send");
        tx.send(frame)
            .await
            .map_err(|_| PipesortError::PeerDisconnected { rank: dest })
    }

    /// Receive the next message from a linked rank, in send order, any tag.
    ///
    /// Blocks until a frame is available.
    pub async fn recv_message(&self, src: Rank) -> Result<PipesortMessage> {
        if src >= self.world_size {
            return Err(PipesortError::InvalidRank {
                rank: src,
                world_size: self.world_size,
            });
        }
        let inbox = self
            .inboxes
            .get(&src)
            .ok_or(PipesortError::UnknownPeer { rank: src })?;
        let frame = inbox
            .lock()
            .await
            .recv()
            .await
            .ok_or(PipesortError::PeerDisconnected { rank: src })?;
        let (_, msg) = decode_message(&frame)?;
        tracing::trace!(rank = self.rank, src, tag = ?msg.tag(), "recv");
        Ok(msg)
    }

    /// Get the next barrier epoch (per-endpoint counter).
    ///
    /// All ranks call `barrier` the same number of times, so the counters
    /// advance in lockstep across the substrate.
    pub(crate) fn next_barrier_epoch(&self) -> u64 {
        self.barrier_epoch.fetch_add(1, Ordering::Relaxed)
    }
}
