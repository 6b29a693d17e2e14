use crate::error::{PipesortError, Result};
use crate::protocol::PipesortMessage;
use crate::transport::Endpoint;
use crate::types::Rank;
use std::time::Duration;

/// Send with a deadline, wrapping failures as `CollectiveFailed`.
pub(crate) async fn collective_send(
    endpoint: &Endpoint,
    dest: Rank,
    msg: &PipesortMessage,
    operation: &'static str,
    timeout: Duration,
) -> Result<()> {
    match tokio::time::timeout(timeout, endpoint.send_message(dest, msg)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(PipesortError::CollectiveFailed {
            operation,
            rank: dest,
            reason: e.to_string(),
        }),
        Err(_) => Err(PipesortError::CollectiveFailed {
            operation,
            rank: dest,
            reason: format!("send timed out after {}ms", timeout.as_millis()),
        }),
    }
}

/// Receive with a deadline, wrapping failures as `CollectiveFailed`.
pub(crate) async fn collective_recv(
    endpoint: &Endpoint,
    src: Rank,
    operation: &'static str,
    timeout: Duration,
) -> Result<PipesortMessage> {
    match tokio::time::timeout(timeout, endpoint.recv_message(src)).await {
        Ok(Ok(msg)) => Ok(msg),
        Ok(Err(e)) => Err(PipesortError::CollectiveFailed {
            operation,
            rank: src,
            reason: e.to_string(),
        }),
        Err(_) => Err(PipesortError::CollectiveFailed {
            operation,
            rank: src,
            reason: format!("recv timed out after {}ms", timeout.as_millis()),
        }),
    }
}
