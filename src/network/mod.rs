//! Network Module
//!
//! TCP server and per-connection request handling.
//!
//! ## Architecture
//! - Single acceptor thread
//! - One detached worker thread per connection
//! - Each worker exclusively owns its stream and its last-access state

mod server;
mod connection;

pub use server::Server;
pub use connection::Connection;
