//! The network boundary.
//!
//! # Design
//! The executor never opens sockets. It hands an `OutgoingRequest` to a
//! `Transport` and gets a `RawResponse` back, which keeps the pipeline
//! testable with an in-memory transport and lets callers plug in any HTTP
//! stack. `ReqwestTransport` is the stock implementation.
//!
//! Cancellation travels the other way as an `AbortSignal`. A transport that
//! observes the signal should stop work and return `TransportError::Aborted`.

#[cfg(feature = "reqwest")]
mod reqwest_transport;

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

use async_trait::async_trait;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

use crate::http::{OutgoingRequest, RawResponse};

/// Something that can carry an `OutgoingRequest` to a server.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one round-trip. `signal`, when given, fires if the caller
    /// gives up on the request.
    async fn send(
        &self,
        request: &OutgoingRequest,
        signal: Option<AbortSignal>,
    ) -> Result<RawResponse, TransportError>;
}

/// Failures reported by a transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request was abandoned because its abort signal fired.
    #[error("The operation was aborted")]
    Aborted,

    #[error("connection error: {message}")]
    Connect { message: String },

    #[error("request error: {message}")]
    Request { message: String },

    /// The response body could not be read.
    #[error("body error: {message}")]
    Body { message: String },
}

/// Owner side of a cancellation pair. Aborting is permanent and idempotent.
#[derive(Debug, Clone, Default)]
pub struct AbortController {
    token: CancellationToken,
}

impl AbortController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signal(&self) -> AbortSignal {
        AbortSignal {
            token: self.token.clone(),
        }
    }

    pub fn abort(&self) {
        self.token.cancel();
    }

    pub fn is_aborted(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Observer side of a cancellation pair, handed to the transport.
#[derive(Debug, Clone)]
pub struct AbortSignal {
    token: CancellationToken,
}

impl AbortSignal {
    pub fn is_aborted(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the controller aborts.
    pub fn aborted(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abort_is_visible_through_every_signal() {
        let controller = AbortController::new();
        let a = controller.signal();
        let b = controller.signal();
        assert!(!a.is_aborted());

        controller.abort();
        controller.abort();
        assert!(controller.is_aborted());
        assert!(a.is_aborted());
        assert!(b.is_aborted());
    }

    #[tokio::test]
    async fn aborted_future_resolves_after_abort() {
        let controller = AbortController::new();
        let signal = controller.signal();
        let waiter = tokio::spawn(async move { signal.aborted().await });
        controller.abort();
        waiter.await.unwrap();
    }

    #[test]
    fn controllers_do_not_share_state() {
        let first = AbortController::new();
        let second = AbortController::new();
        first.abort();
        assert!(!second.signal().is_aborted());
    }
}
