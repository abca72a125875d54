//! Resource Module
//!
//! Opens the backing file named by a `MYGET` request and streams it out.
//!
//! Failures are classified into protocol error codes:
//! - the file cannot be opened, or is not a regular file: 404
//! - the file opened but its metadata is unavailable: 500

use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{LastGetError, Result};
use crate::protocol::ErrorCode;

/// An opened backing resource with its size fixed at open time
#[derive(Debug)]
pub struct Resource {
    path: PathBuf,
    file: File,
    size: u64,
}

impl Resource {
    /// Open a resource for streaming
    ///
    /// Returns the error code to answer with when the resource is unusable.
    pub fn open(path: impl AsRef<Path>) -> std::result::Result<Self, ErrorCode> {
        let path = path.as_ref();

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                tracing::trace!("Cannot open {}: {}", path.display(), e);
                return Err(ErrorCode::NotFound);
            }
        };

        let metadata = match file.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!("Cannot stat {}: {}", path.display(), e);
                return Err(ErrorCode::Internal);
            }
        };

        if !metadata.is_file() {
            return Err(ErrorCode::NotFound);
        }

        Ok(Self {
            path: path.to_path_buf(),
            file,
            size: metadata.len(),
        })
    }

    /// Size announced in the `OK` header
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stream exactly `size()` bytes into `sink`, `chunk_size` at a time
    ///
    /// Bytes appended after open are not sent. If the file shrank or a read
    /// fails partway, an error is returned after whatever was already written;
    /// the caller must then abandon the stream since the framing is broken.
    pub fn stream_to<W: Write>(&mut self, sink: &mut W, chunk_size: usize) -> Result<u64> {
        let mut buf = vec![0u8; chunk_size.max(1)];
        let mut remaining = self.size;

        while remaining > 0 {
            let want = remaining.min(buf.len() as u64) as usize;
            let read = match self.file.read(&mut buf[..want]) {
                Ok(0) => {
                    return Err(LastGetError::ResourceShrank {
                        path: self.path.clone(),
                        remaining,
                    })
                }
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(LastGetError::ResourceRead {
                        path: self.path.clone(),
                        source,
                    })
                }
            };
            sink.write_all(&buf[..read])?;
            remaining -= read as u64;
        }

        Ok(self.size)
    }
}
