//! Timeout enforcement around a single transport call.
//!
//! # Design
//! The transport future races a timer inside one `select!`. Whichever side
//! loses is dropped on the spot, so the timer never outlives the call on
//! any exit path and a transport that ignores its abort signal is still
//! cut off. When the timer wins, the abort signal is fired as well so a
//! transport that spawned background work can stop it.

use std::time::Duration;

use tracing::warn;

use crate::error::HttpError;
use crate::http::{OutgoingRequest, RawResponse};
use crate::transport::{AbortController, Transport, TransportError};

/// Send `request`, giving up after `timeout`.
///
/// A missing or zero timeout calls the transport directly with no abort
/// signal. An abort caused by our own timer becomes a `Timeout` error; any
/// other transport failure becomes a `Network` error.
pub async fn send_with_timeout(
    transport: &dyn Transport,
    request: &OutgoingRequest,
    timeout: Option<Duration>,
) -> Result<RawResponse, HttpError> {
    let Some(timeout) = timeout.filter(|t| !t.is_zero()) else {
        return transport
            .send(request, None)
            .await
            .map_err(|e| network_failure(e, request));
    };

    let controller = AbortController::new();
    let outcome = tokio::select! {
        biased;
        result = transport.send(request, Some(controller.signal())) => result,
        _ = tokio::time::sleep(timeout) => {
            controller.abort();
            Err(TransportError::Aborted)
        }
    };

    match outcome {
        Ok(response) => Ok(response),
        Err(TransportError::Aborted) if controller.is_aborted() => {
            warn!(url = %request.url, timeout_ms = timeout.as_millis() as u64, "request timed out");
            Err(HttpError::timeout(timeout, Some(request.clone())))
        }
        Err(e) => Err(network_failure(e, request)),
    }
}

fn network_failure(error: TransportError, request: &OutgoingRequest) -> HttpError {
    warn!(url = %request.url, error = %error, "transport failed");
    HttpError::network(error, Some(request.clone()))
}
