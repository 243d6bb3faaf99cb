//! Synchronous client core for the Ola ride-hailing API.
//!
//! # Overview
//! Turns a logical API call (verb, path, parameters) into a fully-formed
//! `HttpRequest`, runs it through a pluggable `Transport`, and turns the
//! outcome into either a decoded JSON value or a typed `ClientError`.
//!
//! # Design
//! - `ClientConfig` is resolved once from defaults plus user settings and
//!   never changes afterwards.
//! - Credentials are checked per request, before any I/O.
//! - Every response actually received updates the client's rate-limit
//!   snapshot, but only when all three rate-limit headers are present.
//! - The network lives behind `Transport`; `UreqTransport` (feature `ureq`,
//!   on by default) is the stock implementation.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod rate_limit;
pub mod response;
#[cfg(feature = "ureq")]
pub mod transport;

pub use client::Client;
pub use config::{ClientConfig, PartialConfig};
pub use error::{ApiError, ClientError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Parameters, Transport, TransportError};
pub use rate_limit::RateLimitSnapshot;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
