use crate::protocol::codec::MessageTag;
use crate::types::{Rank, Value};

/// Messages exchanged between ranks of the sorting chain.
///
/// Value traffic and control traffic share one enum. A receiver blocks on
/// "next message from this peer" without knowing in advance whether more
/// data is coming, then branches on the tag. This is the dynamic-probe
/// discipline the chain protocol is built on.
#[derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize, Debug, Clone, PartialEq)]
pub enum PipesortMessage {
    /// One value to be compared against the receiver's held slot.
    Data { src_rank: Rank, value: Value },

    /// No further `Data` will arrive on this link. Cascades down the chain.
    End,

    /// A rank's final held value, converging on the collection root.
    Gather { src_rank: Rank, value: Value },

    /// Barrier fence: the sender has reached the given epoch.
    Barrier { epoch: u64 },

    /// Coordinator acknowledgement releasing a barrier epoch.
    BarrierAck { epoch: u64 },
}

impl PipesortMessage {
    /// The wire tag identifying this variant in the frame header.
    pub fn tag(&self) -> MessageTag {
        match self {
            PipesortMessage::Data { .. } => MessageTag::Data,
            PipesortMessage::End => MessageTag::End,
            PipesortMessage::Gather { .. } => MessageTag::Gather,
            PipesortMessage::Barrier { .. } => MessageTag::Barrier,
            PipesortMessage::BarrierAck { .. } => MessageTag::BarrierAck,
        }
    }
}
