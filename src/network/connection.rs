//! Connection Handler
//!
//! Handles individual client connections.
//!
//! ## State Machine
//! ```text
//! AwaitingRequest ──line──▶ Dispatching ──▶ Sending ──▶ (touch) ──▶ AwaitingRequest
//!        │                                     │
//!        └── end of stream / read error ───────┴── write error ──▶ Closed
//! ```

use std::io::{BufReader, BufWriter, Write};
use std::net::TcpStream;

use chrono::{DateTime, Local};

use crate::config::Config;
use crate::error::Result;
use crate::protocol::{encode_response, read_request, write_response, ErrorCode, Request, Response};
use crate::resource::Resource;

/// Handles a single client connection
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,

    max_line_len: usize,
    chunk_size: usize,

    /// When this connection last finished processing a request
    last_access: Option<DateTime<Local>>,
}

impl Connection {
    /// Create a new connection handler
    ///
    /// Sets up buffered I/O; `last_access` starts as "never".
    pub fn new(stream: TcpStream, config: &Config) -> Result<Self> {
        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        stream.set_nodelay(config.nodelay)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
            max_line_len: config.max_line_len,
            chunk_size: config.chunk_size,
            last_access: None,
        })
    }

    /// Handle the connection (blocking until closed)
    ///
    /// Reads requests in a loop and sends one response per request.
    /// Returns when the client disconnects or an error occurs.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        loop {
            let request = match read_request(&mut self.reader, self.max_line_len) {
                Ok(Some(request)) => request,
                Ok(None) => {
                    tracing::debug!("Client {} disconnected", self.peer_addr);
                    return Ok(());
                }
                Err(e) if e.is_disconnect() => {
                    tracing::debug!("Connection to {} dropped: {}", self.peer_addr, e);
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!("Error reading from {}: {}", self.peer_addr, e);
                    return Err(e);
                }
            };

            tracing::trace!(
                "Received {:?} request from {}: {:?}",
                request.request_type(),
                self.peer_addr,
                request
            );

            // Respond first: LASTACCESS must report the moment before this request
            let sent = self.respond(&request);
            self.touch();

            if let Err(e) = sent {
                if e.is_disconnect() {
                    tracing::debug!(
                        "Client {} disconnected before response could be sent: {}",
                        self.peer_addr,
                        e
                    );
                    return Ok(());
                }
                tracing::warn!("Error writing to {}: {}", self.peer_addr, e);
                return Err(e);
            }
        }
    }

    /// Dispatch a request and send its full response
    fn respond(&mut self, request: &Request) -> Result<()> {
        match request {
            Request::Get { path } if path.is_empty() => {
                self.send_response(&Response::error(ErrorCode::BadRequest))
            }
            Request::Get { path } => self.send_resource(path),
            Request::LastAccess => {
                let previous = self.last_access;
                self.send_response(&Response::last_access(previous))
            }
            Request::Unknown { .. } => self.send_response(&Response::error(ErrorCode::BadRequest)),
        }
    }

    /// Send `OK <size>` followed by the resource body, or the matching `ERR`
    fn send_resource(&mut self, path: &str) -> Result<()> {
        let mut resource = match Resource::open(path) {
            Ok(resource) => resource,
            Err(code) => return self.send_response(&Response::error(code)),
        };

        self.writer
            .write_all(&encode_response(&Response::ok(resource.size())))?;
        let sent = resource.stream_to(&mut self.writer, self.chunk_size)?;
        self.writer.flush()?;

        tracing::trace!(
            "Sent {} bytes of {} to {}",
            sent,
            resource.path().display(),
            self.peer_addr
        );
        Ok(())
    }

    /// Send a response to the client
    fn send_response(&mut self, response: &Response) -> Result<()> {
        write_response(&mut self.writer, response)
    }

    /// Record that a request has just finished processing
    fn touch(&mut self) {
        self.last_access = Some(Local::now());
    }

    /// When this connection last finished processing a request
    pub fn last_access(&self) -> Option<DateTime<Local>> {
        self.last_access
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
