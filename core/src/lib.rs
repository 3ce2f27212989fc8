//! Small HTTP client convenience layer.
//!
//! # Overview
//! Wraps a pluggable transport with URL and query construction, JSON body
//! serialization, timeout-based cancellation, content-type aware response
//! decoding and a single error type.
//!
//! # Design
//! - `executor::request` is the whole pipeline: build the outgoing request,
//!   send it through the timeout guard, decode the body, check the status.
//! - The network sits behind the `Transport` trait (host-does-IO), with
//!   `ReqwestTransport` as the default implementation.
//! - `Client` binds a `ClientConfig` to a transport and offers the
//!   per-verb shortcuts. There is no global client.
//! - Every failure is an `HttpError` whose `ErrorKind` tells status,
//!   timeout, network, decode and URL failures apart.

pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod executor;
pub mod http;
pub mod query;
pub mod timeout;
pub mod transport;
pub mod url_builder;

#[cfg(feature = "reqwest")]
pub use client::create_client;
pub use client::Client;
pub use config::ClientConfig;
pub use error::{ErrorKind, HttpError, Result};
pub use executor::{request, USER_AGENT, VERSION};
pub use http::{
    Headers, HttpMethod, HttpResponse, OutgoingRequest, ParamValue, Params, Payload, RawResponse,
    RequestOptions, ResponseData, ResponseHead, ResponseHeaders,
};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::{AbortController, AbortSignal, Transport, TransportError};
