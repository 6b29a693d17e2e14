use crate::error::{PipesortError, Result};
use crate::types::Rank;

/// Position of one participant in the linear sorting chain.
///
/// Rank and world size are fixed at launch. Every stage entry point takes
/// the topology explicitly rather than reading ambient process state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainTopology {
    rank: Rank,
    world_size: u32,
}

impl ChainTopology {
    pub fn new(rank: Rank, world_size: u32) -> Result<Self> {
        if world_size == 0 {
            return Err(PipesortError::InvalidWorldSize { world_size });
        }
        if rank >= world_size {
            return Err(PipesortError::InvalidRank { rank, world_size });
        }
        Ok(Self { rank, world_size })
    }

    /// This participant's rank (0-indexed).
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Total number of ranks in the chain.
    pub fn world_size(&self) -> u32 {
        self.world_size
    }

    /// The neighbor values arrive from. `None` at the head of the chain.
    pub fn upstream(&self) -> Option<Rank> {
        if self.rank == 0 {
            None
        } else {
            Some(self.rank - 1)
        }
    }

    /// The neighbor values are forwarded to. `None` at the tail.
    pub fn downstream(&self) -> Option<Rank> {
        if self.rank + 1 == self.world_size {
            None
        } else {
            Some(self.rank + 1)
        }
    }

    /// Whether this rank seeds the chain with the input.
    pub fn is_source(&self) -> bool {
        self.rank == 0
    }

    /// Whether this rank is the last in the chain.
    pub fn is_tail(&self) -> bool {
        self.rank + 1 == self.world_size
    }
}
