//! Request definitions
//!
//! Represents request lines sent by clients.

/// Prefix of a file request; the path is the rest of the line
pub const GET_PREFIX: &str = "MYGET ";

/// Exact line of a last-access request
pub const LAST_ACCESS_LINE: &str = "MYLASTACCESS";

/// Request types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Get,
    LastAccess,
    Unknown,
}

/// A parsed request line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Fetch a resource by path (an empty path is still a `Get`)
    Get { path: String },

    /// Ask when this connection last finished a request
    LastAccess,

    /// Any line matching neither grammar, kept verbatim
    Unknown { line: String },
}

impl Request {
    /// Parse a line with its terminator already stripped.
    ///
    /// Matching is case-sensitive and never fails: unmatched input
    /// becomes `Request::Unknown`.
    pub fn parse(line: &str) -> Self {
        if let Some(path) = line.strip_prefix(GET_PREFIX) {
            Request::Get {
                path: path.to_string(),
            }
        } else if line == LAST_ACCESS_LINE {
            Request::LastAccess
        } else {
            Request::Unknown {
                line: line.to_string(),
            }
        }
    }

    /// Get the request type
    pub fn request_type(&self) -> RequestType {
        match self {
            Request::Get { .. } => RequestType::Get,
            Request::LastAccess => RequestType::LastAccess,
            Request::Unknown { .. } => RequestType::Unknown,
        }
    }
}
