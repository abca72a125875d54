//! Request Tests
//!
//! These tests verify:
//! - Request line grammar (MYGET / MYLASTACCESS / anything else)
//! - Error code mapping

use lastget::protocol::{ErrorCode, Request, RequestType};

// =============================================================================
// Grammar Tests
// =============================================================================

#[test]
fn test_parse_get() {
    assert_eq!(
        Request::parse("MYGET /tmp/f"),
        Request::Get {
            path: "/tmp/f".to_string()
        }
    );
}

#[test]
fn test_parse_get_empty_path() {
    assert_eq!(
        Request::parse("MYGET "),
        Request::Get {
            path: String::new()
        }
    );
}

#[test]
fn test_parse_get_keeps_rest_of_line_verbatim() {
    assert_eq!(
        Request::parse("MYGET  two  spaces "),
        Request::Get {
            path: " two  spaces ".to_string()
        }
    );
}

#[test]
fn test_parse_get_without_separator_is_unknown() {
    assert_eq!(
        Request::parse("MYGET"),
        Request::Unknown {
            line: "MYGET".to_string()
        }
    );
}

#[test]
fn test_parse_last_access() {
    assert_eq!(Request::parse("MYLASTACCESS"), Request::LastAccess);
}

#[test]
fn test_parse_last_access_must_be_exact() {
    for line in ["MYLASTACCESS ", "MYLASTACCESS now", " MYLASTACCESS"] {
        assert_eq!(Request::parse(line).request_type(), RequestType::Unknown);
    }
}

#[test]
fn test_parse_is_case_sensitive() {
    assert_eq!(Request::parse("myget /tmp/f").request_type(), RequestType::Unknown);
    assert_eq!(Request::parse("MyLastAccess").request_type(), RequestType::Unknown);
}

#[test]
fn test_parse_empty_line_is_unknown() {
    assert_eq!(
        Request::parse(""),
        Request::Unknown {
            line: String::new()
        }
    );
}

#[test]
fn test_request_type() {
    assert_eq!(Request::parse("MYGET x").request_type(), RequestType::Get);
    assert_eq!(Request::parse("MYLASTACCESS").request_type(), RequestType::LastAccess);
    assert_eq!(Request::parse("QUIT").request_type(), RequestType::Unknown);
}

// =============================================================================
// Error Code Tests
// =============================================================================

#[test]
fn test_error_codes() {
    assert_eq!(ErrorCode::BadRequest.code(), 400);
    assert_eq!(ErrorCode::NotFound.code(), 404);
    assert_eq!(ErrorCode::Internal.code(), 500);

    assert_eq!(ErrorCode::BadRequest.message(), "BadRequest");
    assert_eq!(ErrorCode::NotFound.message(), "NotFound");
    assert_eq!(ErrorCode::Internal.message(), "Internal");
}

#[test]
fn test_error_code_from_code() {
    for code in [ErrorCode::BadRequest, ErrorCode::NotFound, ErrorCode::Internal] {
        assert_eq!(ErrorCode::from_code(code.code()), Some(code));
    }
    assert_eq!(ErrorCode::from_code(200), None);
}
