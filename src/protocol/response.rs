//! Response definitions
//!
//! Represents response headers sent back to clients.

use std::fmt;

use chrono::{DateTime, FixedOffset, TimeZone};

/// strftime pattern of a `LASTACCESS` value: local time with numeric offset
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Value sent by `LASTACCESS` before any request completed
pub const NULL_MARKER: &str = "NULL";

/// Error codes carried by `ERR` responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    BadRequest = 400,
    NotFound = 404,
    Internal = 500,
}

impl ErrorCode {
    /// Numeric code as sent on the wire
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Message word sent after the code
    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BadRequest",
            ErrorCode::NotFound => "NotFound",
            ErrorCode::Internal => "Internal",
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            400 => Some(ErrorCode::BadRequest),
            404 => Some(ErrorCode::NotFound),
            500 => Some(ErrorCode::Internal),
            _ => None,
        }
    }
}

/// A response header
///
/// `Ok` only announces the body size; the body itself is streamed
/// separately so that large resources never sit in memory.
///
/// `Err` and `LastAccess` keep their fields as the text that was sent, so a
/// decoded header renders back to exactly the line received. Typed views are
/// available through [`Response::error_code`] and [`Response::last_access_time`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Success, followed by exactly `size` raw bytes
    Ok { size: u64 },

    /// Protocol-level error; the connection stays open
    ///
    /// `message` is `None` when no separator followed the code.
    Err {
        code: String,
        message: Option<String>,
    },

    /// Previous access time of the connection, `None` for `NULL`
    LastAccess(Option<String>),
}

impl Response {
    /// Create an OK header announcing `size` body bytes
    pub fn ok(size: u64) -> Self {
        Response::Ok { size }
    }

    /// Create an ERR response for a known code
    pub fn error(code: ErrorCode) -> Self {
        Response::Err {
            code: code.code().to_string(),
            message: Some(code.message().to_string()),
        }
    }

    /// Create a LASTACCESS response from a timestamp in any zone
    ///
    /// The offset of the given zone is preserved on the wire.
    pub fn last_access<Tz: TimeZone>(when: Option<DateTime<Tz>>) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        Response::LastAccess(when.map(|t| t.format(TIMESTAMP_FORMAT).to_string()))
    }

    /// The known error code, if this is an `Err` with one
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Response::Err { code, .. } => code.parse::<u16>().ok().and_then(ErrorCode::from_code),
            _ => None,
        }
    }

    /// The reported timestamp, if this is a `LastAccess` with a parseable one
    ///
    /// Accepts the `%z` form this crate sends as well as RFC 3339
    /// (`+02:00`, `Z`, fractional seconds).
    pub fn last_access_time(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Response::LastAccess(Some(value)) => DateTime::parse_from_str(value, TIMESTAMP_FORMAT)
                .or_else(|_| DateTime::parse_from_rfc3339(value))
                .ok(),
            _ => None,
        }
    }
}

/// Renders the header line without its trailing newline
impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Ok { size } => write!(f, "OK {}", size),
            Response::Err {
                code,
                message: None,
            } => write!(f, "ERR {}", code),
            Response::Err {
                code,
                message: Some(message),
            } => write!(f, "ERR {} {}", code, message),
            Response::LastAccess(Some(value)) => write!(f, "LASTACCESS {}", value),
            Response::LastAccess(None) => write!(f, "LASTACCESS {}", NULL_MARKER),
        }
    }
}
