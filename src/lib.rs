//! Widget event bridge.
//!
//! Client-side widgets (calendars, accordions, context menus, charts, list views)
//! report user interactions to the server as asynchronous GET requests. This
//! crate handles both directions of that exchange:
//! - generating the client trigger expressions that issue the requests
//! - decoding each request into one typed event and routing it to a listener
//! - serving read-only JSON feeds for list and chart widgets
//!
//! # Architecture
//!
//! - `codec`: query parameter encode/decode
//! - `event`: the closed set of decoded events
//! - `dispatch`: listener traits and event routing
//! - `widget`: widget behaviors (which callbacks, which listener)
//! - `endpoint`: callback endpoints, throttling and the endpoint registry
//! - `feed`: data-feed endpoints and row renderers
//! - `bus`: refresh instructions handed to the page renderer
//! - `commands`: host entry point mapping requests to replies
//! - `config`: bridge configuration

pub mod bus;
pub mod codec;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod endpoint;
pub mod event;
pub mod feed;
pub mod widget;

use serde::Serialize;

pub use commands::{handle_request, Reply};
pub use config::BridgeConfig;
pub use endpoint::EndpointRegistry;

// ---------------------------------------------------------------------------
// Shared error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("{0}")]
    Decode(#[from] codec::DecodeError),
    #[error("{0}")]
    Bind(#[from] endpoint::BindError),
    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(String),
    #[error("endpoint {0} has no bound widget")]
    NotBound(String),
    #[error("widget behind {0} panicked while handling an earlier event")]
    WidgetPoisoned(String),
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("{0}")]
    Other(String),
}

impl BridgeError {
    /// HTTP status the host should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Decode(_) => 400,
            Self::UnknownEndpoint(_) => 404,
            _ => 500,
        }
    }
}

impl Serialize for BridgeError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

const DEFAULT_LOG_FILTER: &str = "widgetwire=debug,info";

/// Install the fmt subscriber, filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
