use crate::types::Rank;

pub type Result<T> = std::result::Result<T, PipesortError>;

#[derive(Debug, thiserror::Error)]
pub enum PipesortError {
    #[error("world size {world_size} is invalid: the chain needs at least one rank")]
    InvalidWorldSize { world_size: u32 },

    #[error("invalid rank {rank}: world size is {world_size}")]
    InvalidRank { rank: Rank, world_size: u32 },

    #[error("rank {rank} has no link to this endpoint")]
    UnknownPeer { rank: Rank },

    #[error("peer {rank} disconnected unexpectedly")]
    PeerDisconnected { rank: Rank },

    #[error("message encode failed: {0}")]
    EncodeFailed(String),

    #[error("message decode failed: {0}")]
    DecodeFailed(String),

    #[error("protocol violation at rank {rank}: {reason}")]
    ProtocolViolation { rank: Rank, reason: String },

    #[error("input holds {actual} values but the chain has {expected} ranks")]
    InputSizeMismatch { expected: usize, actual: usize },

    #[error("input buffer allocation failed: {0}")]
    InputAllocation(#[from] std::collections::TryReserveError),

    #[error("value bound must be at least 1")]
    InvalidValueBound,

    #[error("{operation} failed at rank {rank}: {reason}")]
    CollectiveFailed {
        operation: &'static str,
        rank: Rank,
        reason: String,
    },

    #[error("rank {rank} task failed: {reason}")]
    TaskFailed { rank: Rank, reason: String },
}

impl PipesortError {
    /// Create a `ProtocolViolation` with just a reason.
    pub fn protocol(rank: Rank, reason: impl Into<String>) -> Self {
        Self::ProtocolViolation {
            rank,
            reason: reason.into(),
        }
    }
}
