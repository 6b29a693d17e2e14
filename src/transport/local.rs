use crate::config::PipesortConfig;
use crate::error::{PipesortError, Result};
use crate::transport::Endpoint;
use crate::types::{Rank, ROOT_RANK};
use std::collections::{HashMap, HashSet};
use tokio::sync::mpsc;

/// Build the in-process channel substrate: one `Endpoint` per rank.
///
/// This is the single-process counterpart of a multi-process launch, for
/// tests and demos where each rank lives on its own tokio task. Links are
/// provisioned for the chain protocol and its root-convergent collectives:
///
/// - `r -> r+1` for every non-tail rank (the sorting chain), and
/// - `r <-> 0` for every non-zero rank (gather contributions and the
///   barrier fence/release).
///
/// Sending on a pair with no provisioned link fails with `UnknownPeer`.
pub fn bootstrap_local(world_size: u32, config: &PipesortConfig) -> Result<Vec<Endpoint>> {
    if world_size == 0 {
        return Err(PipesortError::InvalidWorldSize { world_size });
    }

    let mut links: HashSet<(Rank, Rank)> = HashSet::new();
    for r in 0..world_size.saturating_sub(1) {
        links.insert((r, r + 1));
    }
    for r in 1..world_size {
        links.insert((r, ROOT_RANK));
        links.insert((ROOT_RANK, r));
    }

    let mut senders: Vec<HashMap<Rank, mpsc::Sender<Vec<u8>>>> =
        (0..world_size).map(|_| HashMap::new()).collect();
    let mut inboxes: Vec<HashMap<Rank, mpsc::Receiver<Vec<u8>>>> =
        (0..world_size).map(|_| HashMap::new()).collect();

    for (from, to) in links {
        let (tx, rx) = mpsc::channel(config.link_capacity);
        senders[from as usize].insert(to, tx);
        inboxes[to as usize].insert(from, rx);
    }

    let endpoints = senders
        .into_iter()
        .zip(inboxes)
        .enumerate()
        .map(|(rank, (tx_map, rx_map))| Endpoint::new(rank as Rank, world_size, tx_map, rx_map))
        .collect();

    tracing::debug!(world_size, "local substrate ready");
    Ok(endpoints)
}
