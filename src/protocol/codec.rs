//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Framing
//!
//! ```text
//! ┌───────────────────────────────┬──────────────────────────────┐
//! │ Header line (ASCII, ends \n)  │ Body (OK only, <size> bytes) │
//! └───────────────────────────────┴──────────────────────────────┘
//! ```
//!
//! Header lines are read up to a caller-supplied limit. A body is read as
//! "exactly N bytes or fail", never by scanning for a delimiter.

use std::io::{self, BufRead, Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use super::request::{GET_PREFIX, LAST_ACCESS_LINE};
use super::response::NULL_MARKER;
use super::{Request, Response};
use crate::error::{LastGetError, Result};

const OK_PREFIX: &str = "OK ";
const ERR_PREFIX: &str = "ERR ";
const LAST_ACCESS_PREFIX: &str = "LASTACCESS ";

// =============================================================================
// Line Framing
// =============================================================================

/// Read one newline-terminated line, at most `max_len` bytes including `\n`.
///
/// Returns `Ok(None)` when the stream ends before any byte arrives. The
/// trailing `\n` and an optional preceding `\r` are stripped. A stream that
/// ends mid-line is an error, never a short line.
pub fn read_line<R: BufRead>(reader: &mut R, max_len: usize) -> Result<Option<String>> {
    let mut buf = Vec::new();
    let read = reader
        .by_ref()
        .take(max_len as u64)
        .read_until(b'\n', &mut buf)?;

    if read == 0 {
        return Ok(None);
    }

    if buf.last() != Some(&b'\n') {
        if buf.len() >= max_len {
            return Err(LastGetError::LineTooLong { limit: max_len });
        }
        return Err(LastGetError::IncompleteLine {
            received: buf.len(),
        });
    }

    buf.pop();
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }

    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

// =============================================================================
// Request Encoding/Decoding
// =============================================================================

/// Encode a request to its wire line, newline included
pub fn encode_request(request: &Request) -> Bytes {
    let mut buf = BytesMut::new();
    match request {
        Request::Get { path } => {
            buf.put_slice(GET_PREFIX.as_bytes());
            buf.put_slice(path.as_bytes());
        }
        Request::LastAccess => buf.put_slice(LAST_ACCESS_LINE.as_bytes()),
        Request::Unknown { line } => buf.put_slice(line.as_bytes()),
    }
    buf.put_u8(b'\n');
    buf.freeze()
}

/// Read and parse one request line
///
/// Returns `Ok(None)` on clean end of stream.
pub fn read_request<R: BufRead>(reader: &mut R, max_len: usize) -> Result<Option<Request>> {
    Ok(read_line(reader, max_len)?.map(|line| Request::parse(&line)))
}

/// Write a request to a stream
pub fn write_request<W: Write>(writer: &mut W, request: &Request) -> Result<()> {
    writer.write_all(&encode_request(request))?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response header line, newline included
pub fn encode_response(response: &Response) -> Bytes {
    let line = response.to_string();
    let mut buf = BytesMut::with_capacity(line.len() + 1);
    buf.put_slice(line.as_bytes());
    buf.put_u8(b'\n');
    buf.freeze()
}

/// Write a response header to a stream
///
/// For `Response::Ok` the caller must follow up with exactly `size` bytes.
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    writer.write_all(&encode_response(response))?;
    writer.flush()?;
    Ok(())
}

/// Decode a response header line (terminator already stripped)
///
/// Only the `OK` size is interpreted here, since framing depends on it.
/// `ERR` and `LASTACCESS` values are kept verbatim.
pub fn decode_response(line: &str) -> Result<Response> {
    if let Some(rest) = line.strip_prefix(OK_PREFIX) {
        let size =
            parse_size(rest).ok_or_else(|| LastGetError::MalformedHeader(line.to_string()))?;
        return Ok(Response::Ok { size });
    }

    if let Some(rest) = line.strip_prefix(ERR_PREFIX) {
        let (code, message) = match rest.split_once(' ') {
            Some((code, message)) => (code, Some(message.to_string())),
            None => (rest, None),
        };
        return Ok(Response::Err {
            code: code.to_string(),
            message,
        });
    }

    if let Some(rest) = line.strip_prefix(LAST_ACCESS_PREFIX) {
        let value = (rest != NULL_MARKER).then(|| rest.to_string());
        return Ok(Response::LastAccess(value));
    }

    Err(LastGetError::UnknownResponse(line.to_string()))
}

/// Canonical body size: ASCII digits only, no sign or padding
fn parse_size(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Read and decode one response header
///
/// Returns `Ok(None)` when the stream ends before any byte of the header.
/// Never touches the body: for `Response::Ok` follow up with [`read_body`].
pub fn read_response<R: BufRead>(reader: &mut R, max_len: usize) -> Result<Option<Response>> {
    match read_line(reader, max_len)? {
        Some(line) => decode_response(&line).map(Some),
        None => Ok(None),
    }
}

/// Read exactly `size` body bytes into `sink`
///
/// Bytes are forwarded as they arrive. If the stream ends early the error
/// reports how many bytes were still owed.
pub fn read_body<R: Read, W: Write>(reader: &mut R, size: u64, sink: &mut W) -> Result<u64> {
    let copied = io::copy(&mut reader.by_ref().take(size), sink)?;
    if copied < size {
        return Err(LastGetError::Truncated {
            remaining: size - copied,
        });
    }
    Ok(copied)
}
