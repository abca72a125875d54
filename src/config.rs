//! Configuration for LastGet
//!
//! Centralized configuration with sensible defaults.

use crate::error::{LastGetError, Result};

/// Default TCP port shared by server and client
pub const DEFAULT_PORT: u16 = 12345;

/// Default cap on a header line, newline included
pub const DEFAULT_MAX_LINE_LEN: usize = 4096;

/// Default body streaming chunk
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Main configuration for a LastGet server
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address
    pub listen_addr: String,

    /// Disable Nagle's algorithm on accepted streams
    pub nodelay: bool,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Longest request line accepted, newline included (in bytes)
    pub max_line_len: usize,

    /// Size of each chunk read from a resource while streaming a body (in bytes)
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: format!("0.0.0.0:{}", DEFAULT_PORT),
            nodelay: true,
            max_line_len: DEFAULT_MAX_LINE_LEN,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the configuration can actually serve requests
    pub fn validate(&self) -> Result<()> {
        if self.listen_addr.trim().is_empty() {
            return Err(LastGetError::Config("listen address is empty".to_string()));
        }
        if self.max_line_len == 0 {
            return Err(LastGetError::Config("max_line_len must be non-zero".to_string()));
        }
        if self.chunk_size == 0 {
            return Err(LastGetError::Config("chunk_size must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Enable or disable TCP_NODELAY on accepted streams
    pub fn nodelay(mut self, nodelay: bool) -> Self {
        self.config.nodelay = nodelay;
        self
    }

    /// Set the maximum request line length (in bytes)
    pub fn max_line_len(mut self, len: usize) -> Self {
        self.config.max_line_len = len;
        self
    }

    /// Set the body streaming chunk size (in bytes)
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
