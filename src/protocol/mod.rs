//! Protocol Module
//!
//! Defines the line-oriented wire protocol for client-server communication.
//!
//! ## Requests
//! One line each, terminated by `\n` (a preceding `\r` is tolerated):
//! ```text
//! MYGET <path>\n
//! MYLASTACCESS\n
//! ```
//! Any other line is answered with `ERR 400 BadRequest`.
//!
//! ## Responses
//! ```text
//! OK <size>\n<size raw bytes>
//! ERR <code> <message>\n
//! LASTACCESS <%Y-%m-%dT%H:%M:%S%z>\n
//! LASTACCESS NULL\n
//! ```
//!
//! Headers are framed by newline, bodies by exact byte count. A body carries
//! no terminator and may contain any byte, so it must never be line-scanned.
//!
//! ### Error Codes
//! - 400: BadRequest (empty argument or unrecognized command)
//! - 404: NotFound
//! - 500: Internal (resource metadata unavailable)

mod request;
mod response;
mod codec;

pub use request::{Request, RequestType, GET_PREFIX, LAST_ACCESS_LINE};
pub use response::{ErrorCode, Response, NULL_MARKER, TIMESTAMP_FORMAT};
pub use codec::{
    decode_response, encode_request, encode_response, read_body, read_line, read_request,
    read_response, write_request, write_response,
};
