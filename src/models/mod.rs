// src/models/mod.rs

//! Domain models for the search application.
//!
//! Wire records from the upstream listing, the canonical event shape handed
//! to callers, configuration, and the response envelopes printed by the CLI.

mod config;
mod event;
mod response;

// Re-export all public types
pub use config::{
    CONFIG_FILE_NAME, Config, DisplayConfig, LoggingConfig, SearchConfig, UpstreamConfig,
};
pub use event::{
    CanonicalEvent, EndedState, EventKind, Lifecycle, ListResponse, OnlineState, PageEnvelope,
    RawEventItem,
};
pub use response::{ApiResponse, RawResponse};
