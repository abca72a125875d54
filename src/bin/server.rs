//! LastGet Server Binary
//!
//! Starts the TCP server for LastGet.

use clap::Parser;
use lastget::config::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_LINE_LEN};
use lastget::{Config, Server};
use tracing_subscriber::{fmt, EnvFilter};

/// LastGet Server
#[derive(Parser, Debug)]
#[command(name = "lastget-server")]
#[command(about = "Serve files over the MYGET/MYLASTACCESS line protocol")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "0.0.0.0:12345")]
    listen: String,

    /// Longest accepted request line in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_LINE_LEN)]
    max_line_len: usize,

    /// Bytes read from a file per write while streaming a body
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Leave Nagle's algorithm enabled on client streams
    #[arg(long)]
    no_nodelay: bool,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,lastget=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("LastGet Server v{}", lastget::VERSION);

    let config = Config::builder()
        .listen_addr(&args.listen)
        .max_line_len(args.max_line_len)
        .chunk_size(args.chunk_size)
        .nodelay(!args.no_nodelay)
        .build();

    let mut server = match Server::bind(config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
