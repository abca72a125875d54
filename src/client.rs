//! Client Module
//!
//! Client-side counterpart of the connection handler: encodes user
//! commands into request lines and decodes exactly one response per
//! exchange.

use std::io::{BufReader, BufWriter, Write};
use std::net::{TcpStream, ToSocketAddrs};

use crate::config::DEFAULT_MAX_LINE_LEN;
use crate::error::{LastGetError, Result};
use crate::protocol::{read_body, read_response, write_request, Request, Response};

// =============================================================================
// User Commands
// =============================================================================

/// A command typed at the interactive prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `GET <path>`, or bare `GET` with an empty path
    Get(String),

    /// `LAST`
    Last,

    /// `QUIT`
    Quit,
}

impl Command {
    /// Parse one input line (without its newline)
    ///
    /// Returns `None` for anything that is not a known command.
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "QUIT" => Some(Command::Quit),
            "LAST" => Some(Command::Last),
            "GET" => Some(Command::Get(String::new())),
            _ => input
                .strip_prefix("GET ")
                .map(|path| Command::Get(path.to_string())),
        }
    }

    /// The request this command sends, or `None` for `QUIT`
    ///
    /// An argument containing a line break would frame as two requests and
    /// is rejected.
    pub fn to_request(&self) -> Result<Option<Request>> {
        match self {
            Command::Get(path) => get_request(path).map(Some),
            Command::Last => Ok(Some(Request::LastAccess)),
            Command::Quit => Ok(None),
        }
    }
}

fn get_request(path: &str) -> Result<Request> {
    if path.contains(|c: char| c == '\n' || c == '\r') {
        return Err(LastGetError::InvalidArgument(format!(
            "path contains a line break: {:?}",
            path
        )));
    }
    Ok(Request::Get {
        path: path.to_string(),
    })
}

// =============================================================================
// Client Connection
// =============================================================================

/// One connection to a LastGet server
///
/// Exchanges are strictly sequential: each call sends one request and
/// reads its full response before returning.
pub struct Client {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    max_line_len: usize,
}

impl Client {
    /// Connect to a server (host names are resolved by the OS)
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        Self::from_stream(stream)
    }

    /// Wrap an already connected stream
    pub fn from_stream(stream: TcpStream) -> Result<Self> {
        stream.set_nodelay(true)?;
        let read_stream = stream.try_clone()?;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
            max_line_len: DEFAULT_MAX_LINE_LEN,
        })
    }

    /// Set the longest response header accepted (in bytes)
    pub fn with_max_line_len(mut self, len: usize) -> Self {
        self.max_line_len = len;
        self
    }

    /// Fetch a resource; on success its body is written to `sink`
    pub fn get<W: Write>(&mut self, path: &str, sink: &mut W) -> Result<Response> {
        let request = get_request(path)?;
        self.exchange(&request, sink)
    }

    /// Ask the server when this connection last finished a request
    pub fn last_access(&mut self) -> Result<Response> {
        self.exchange(&Request::LastAccess, &mut std::io::sink())
    }

    /// Send one request and decode its response
    pub fn exchange<W: Write>(&mut self, request: &Request, sink: &mut W) -> Result<Response> {
        tracing::trace!("Sending {:?}", request);
        write_request(&mut self.writer, request)?;
        self.receive(sink)
    }

    /// Decode exactly one response from the stream
    ///
    /// For `OK` the body is copied byte-for-byte into `sink` before
    /// returning. `ERR` and `LASTACCESS` carry no body.
    pub fn receive<W: Write>(&mut self, sink: &mut W) -> Result<Response> {
        let response =
            read_response(&mut self.reader, self.max_line_len)?.ok_or(LastGetError::NoResponse)?;

        if let Response::Ok { size } = response {
            read_body(&mut self.reader, size, sink)?;
            sink.flush()?;
        }

        tracing::trace!("Received {}", response);
        Ok(response)
    }
}
