//! # LastGet
//!
//! A minimal client/server pair speaking a line-oriented, length-framed
//! protocol over TCP:
//! - `MYGET <path>` streams a file back as `OK <size>` plus exactly `size` bytes
//! - `MYLASTACCESS` reports when the connection last finished a request
//! - One thread per connection, no state shared between connections
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │                (accept loop, one thread each)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Connection Handler                          │
//! │        (owns the stream and its last_access cell)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Protocol   │          │  Resource   │
//!   │   Codec     │          │   (file)    │
//!   └──────┬──────┘          └─────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │   Client    │
//!   │  (decoder)  │
//!   └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod resource;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LastGetError, Result};
pub use config::Config;
pub use client::Client;
pub use network::Server;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of LastGet
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
