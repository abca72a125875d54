//! Tests for Resource
//!
//! These tests verify:
//! - Classification of unusable paths into error codes
//! - Exact-size streaming, including chunked and binary content
//! - Behaviour when the file changes size after open

use std::fs::{self, File, OpenOptions};
use std::io::Write;

use lastget::protocol::ErrorCode;
use lastget::resource::Resource;
use lastget::LastGetError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_temp_file(contents: &[u8]) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("f");
    fs::write(&path, contents).unwrap();
    (temp_dir, path)
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_existing_file() {
    let (_temp, path) = write_temp_file(b"hello");
    let resource = Resource::open(&path).unwrap();
    assert_eq!(resource.size(), 5);
    assert_eq!(resource.path(), path.as_path());
}

#[test]
fn test_open_missing_file_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let err = Resource::open(temp_dir.path().join("nope")).unwrap_err();
    assert_eq!(err, ErrorCode::NotFound);
}

#[test]
fn test_open_directory_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let err = Resource::open(temp_dir.path()).unwrap_err();
    assert_eq!(err, ErrorCode::NotFound);
}

#[test]
fn test_open_empty_file() {
    let (_temp, path) = write_temp_file(b"");
    let mut resource = Resource::open(&path).unwrap();
    assert_eq!(resource.size(), 0);

    let mut sink = Vec::new();
    assert_eq!(resource.stream_to(&mut sink, 4096).unwrap(), 0);
    assert!(sink.is_empty());
}

// =============================================================================
// Streaming Tests
// =============================================================================

#[test]
fn test_stream_exact_contents() {
    let (_temp, path) = write_temp_file(b"hello");
    let mut resource = Resource::open(&path).unwrap();

    let mut sink = Vec::new();
    assert_eq!(resource.stream_to(&mut sink, 4096).unwrap(), 5);
    assert_eq!(sink, b"hello");
}

#[test]
fn test_stream_in_small_chunks() {
    let contents: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
    let (_temp, path) = write_temp_file(&contents);
    let mut resource = Resource::open(&path).unwrap();

    let mut sink = Vec::new();
    resource.stream_to(&mut sink, 7).unwrap();
    assert_eq!(sink, contents);
}

#[test]
fn test_stream_clips_bytes_appended_after_open() {
    let (_temp, path) = write_temp_file(b"hello");
    let mut resource = Resource::open(&path).unwrap();

    let mut file = OpenOptions::new().append(true).open(&path).unwrap();
    file.write_all(b" world").unwrap();
    file.sync_all().unwrap();

    let mut sink = Vec::new();
    assert_eq!(resource.stream_to(&mut sink, 4096).unwrap(), 5);
    assert_eq!(sink, b"hello");
}

#[test]
fn test_stream_fails_when_file_shrinks() {
    let (_temp, path) = write_temp_file(b"0123456789");
    let mut resource = Resource::open(&path).unwrap();

    let file = File::options().write(true).open(&path).unwrap();
    file.set_len(4).unwrap();

    let mut sink = Vec::new();
    let err = resource.stream_to(&mut sink, 4096).unwrap_err();
    assert!(matches!(err, LastGetError::ResourceShrank { remaining: 6, .. }));
    assert_eq!(sink, b"0123");
}
