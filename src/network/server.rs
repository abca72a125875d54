//! TCP Server
//!
//! Accepts connections and hands each one to its own worker thread.

use std::io::ErrorKind;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use crate::config::Config;
use crate::error::Result;
use super::Connection;

/// TCP server for LastGet
///
/// Workers are detached: the server never joins them and shares no state
/// with them beyond the read-only config.
pub struct Server {
    config: Arc<Config>,
    listener: TcpListener,
    next_id: u64,
}

impl Server {
    /// Validate the config and bind the listen address
    pub fn bind(config: Config) -> Result<Self> {
        config.validate()?;
        let listener = TcpListener::bind(&config.listen_addr)?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            config: Arc::new(config),
            listener,
            next_id: 0,
        })
    }

    /// Address actually bound (useful when listening on port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections forever (blocking)
    ///
    /// Returns only if accepting fails in a way that is not specific to a
    /// single incoming connection.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.listener.accept() {
                Ok((stream, addr)) => {
                    tracing::debug!("Accepted connection from {}", addr);
                    self.spawn_worker(stream);
                }
                Err(e)
                    if matches!(
                        e.kind(),
                        ErrorKind::Interrupted
                            | ErrorKind::ConnectionAborted
                            | ErrorKind::ConnectionReset
                    ) =>
                {
                    tracing::debug!("Transient accept failure: {}", e);
                }
                Err(e) => {
                    tracing::error!("Accept failed: {}", e);
                    return Err(e.into());
                }
            }
        }
    }

    /// Start a detached worker owning `stream`
    ///
    /// If the thread cannot be created the stream is dropped (closed) and
    /// existing connections are unaffected.
    fn spawn_worker(&mut self, stream: TcpStream) {
        let id = self.next_id;
        self.next_id += 1;
        let config = Arc::clone(&self.config);

        let spawned = thread::Builder::new()
            .name(format!("conn-{}", id))
            .spawn(move || {
                let mut connection = match Connection::new(stream, &config) {
                    Ok(connection) => connection,
                    Err(e) => {
                        tracing::warn!("Failed to set up connection {}: {}", id, e);
                        return;
                    }
                };
                if let Err(e) = connection.handle() {
                    tracing::debug!(
                        "Connection {} ({}) closed with error: {}",
                        id,
                        connection.peer_addr(),
                        e
                    );
                }
            });

        if let Err(e) = spawned {
            tracing::warn!("Dropping connection {}: cannot spawn worker: {}", id, e);
        }
    }
}
