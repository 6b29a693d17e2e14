//! Pipeline stage: the comparison engine run by every non-zero rank.

use crate::error::{PipesortError, Result};
use crate::protocol::PipesortMessage;
use crate::topology::ChainTopology;
use crate::transport::Endpoint;
use crate::types::{Rank, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StageState {
    /// Blocked on the next upstream message.
    Awaiting,
    /// END processed; no further messages accepted or sent.
    Terminated,
}

/// Per-rank state machine of the sorting chain.
///
/// Holds at most one value between messages. Each incoming value is
/// compared against the held slot and the larger of the two moves on
/// downstream, so the slot converges on the smallest value this rank has
/// seen. By the time END arrives, rank `r` holds the `r`-th smallest
/// value overall. The machine is pure: the caller relays whatever it
/// emits and owns the actual send/receive calls.
#[derive(Debug)]
pub struct PipelineStage {
    rank: Rank,
    tail: bool,
    held: Option<Value>,
    state: StageState,
}

impl PipelineStage {
    pub fn new(topology: &ChainTopology) -> Self {
        Self {
            rank: topology.rank(),
            tail: topology.is_tail(),
            held: None,
            state: StageState::Awaiting,
        }
    }

    /// Whether END has been processed.
    pub fn is_terminated(&self) -> bool {
        self.state == StageState::Terminated
    }

    /// The currently held value, if any.
    pub fn held(&self) -> Option<Value> {
        self.held
    }

    /// Feed one incoming value. Returns the value to forward downstream,
    /// if the comparison displaced one.
    ///
    /// The first value seeds the empty slot and nothing is forwarded.
    /// A forwarding obligation at the tail means more values than ranks
    /// were injected, which is a protocol violation.
    pub fn on_data(&mut self, incoming: Value) -> Result<Option<Value>> {
        if self.state == StageState::Terminated {
            return Err(PipesortError::protocol(self.rank, "DATA received after END"));
        }

        let held = match self.held {
            None => {
                self.held = Some(incoming);
                return Ok(None);
            }
            Some(held) => held,
        };

        let outgoing = if incoming < held {
            self.held = Some(incoming);
            held
        } else {
            incoming
        };

        if self.tail {
            return Err(PipesortError::protocol(
                self.rank,
                format!("no downstream link to forward value {outgoing}"),
            ));
        }
        Ok(Some(outgoing))
    }

    /// Feed the end-of-stream marker. Returns `true` when the marker must
    /// cascade downstream.
    ///
    /// END with an empty slot means fewer values than ranks were injected;
    /// a second END means the upstream ordering guarantee is broken. Both
    /// are fatal.
    pub fn on_end(&mut self) -> Result<bool> {
        if self.state == StageState::Terminated {
            return Err(PipesortError::protocol(self.rank, "duplicate END"));
        }
        if self.held.is_none() {
            return Err(PipesortError::protocol(
                self.rank,
                "END received before any DATA",
            ));
        }
        self.state = StageState::Terminated;
        Ok(!self.tail)
    }

    /// Consume the stage and yield its final held value.
    pub fn into_held(self) -> Result<Value> {
        match (self.state, self.held) {
            (StageState::Terminated, Some(value)) => Ok(value),
            _ => Err(PipesortError::protocol(
                self.rank,
                "held slot read before termination",
            )),
        }
    }
}

/// Drive a pipeline stage to completion: block on the upstream link, fold
/// each message into the state machine, relay what it emits. Returns the
/// rank's final held value once END has been processed and cascaded.
///
/// The loop suspends only at its receive call; per-pair FIFO delivery is
/// what makes the arrival order meaningful.
pub async fn run_pipeline(endpoint: &Endpoint, topology: &ChainTopology) -> Result<Value> {
    let upstream = topology.upstream().ok_or_else(|| {
        PipesortError::protocol(topology.rank(), "pipeline stage started on the chain head")
    })?;

    let mut stage = PipelineStage::new(topology);
    let mut received = 0u32;

    loop {
        match endpoint.recv_message(upstream).await? {
            PipesortMessage::Data { value, .. } => {
                received += 1;
                if let Some(outgoing) = stage.on_data(value)? {
                    let downstream = topology
                        .downstream()
                        .expect("stage only forwards when a downstream link exists");
                    let msg = PipesortMessage::Data {
                        src_rank: topology.rank(),
                        value: outgoing,
                    };
                    endpoint.send_message(downstream, &msg).await?;
                }
            }
            PipesortMessage::End => {
                if stage.on_end()? {
                    let downstream = topology
                        .downstream()
                        .expect("END cascades only when a downstream link exists");
                    endpoint.send_message(downstream, &PipesortMessage::End).await?;
                }
                break;
            }
            other => {
                return Err(PipesortError::protocol(
                    topology.rank(),
                    format!("unexpected message on the chain link: {other:?}"),
                ));
            }
        }
    }

    tracing::debug!(
        rank = topology.rank(),
        received,
        "pipeline stage terminated"
    );
    stage.into_held()
}
