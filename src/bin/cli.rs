//! LastGet CLI Client
//!
//! Interactive client: one request/response exchange per command.

use std::io::{self, BufRead, Write};

use clap::Parser;
use lastget::client::Command;
use lastget::config::{DEFAULT_MAX_LINE_LEN, DEFAULT_PORT};
use lastget::protocol::Response;
use lastget::Client;
use tracing_subscriber::{fmt, EnvFilter};

const HELP: &str = "Commands: GET <file>, LAST, QUIT";

/// LastGet CLI
#[derive(Parser, Debug)]
#[command(name = "lastget-cli")]
#[command(about = "Interactive client for a LastGet server")]
#[command(after_help = HELP)]
struct Args {
    /// Server host name or address
    server: String,

    /// Server port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Longest accepted response header in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_LINE_LEN)]
    max_line_len: usize,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let args = Args::parse();

    let mut client = match Client::connect((args.server.as_str(), args.port)) {
        Ok(client) => client.with_max_line_len(args.max_line_len),
        Err(e) => {
            eprintln!("connect failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("Connected. {}", HELP);

    if let Err(e) = run_session(&mut client) {
        eprintln!("{}", e);
    }

    println!("Connection closed.");
}

/// Read commands from stdin until QUIT, EOF or an unusable stream
fn run_session(client: &mut Client) -> lastget::Result<()> {
    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            return Ok(());
        }
        let line = input.trim_end_matches(|c: char| c == '\n' || c == '\r');
        if line.is_empty() {
            continue;
        }

        let request = match Command::parse(line).map(|command| command.to_request()) {
            Some(Ok(Some(request))) => request,
            Some(Ok(None)) => return Ok(()),
            Some(Err(e)) => {
                eprintln!("{}", e);
                continue;
            }
            None => {
                println!("Unknown command: {}", line);
                println!("{}", HELP);
                continue;
            }
        };

        let mut stdout = io::stdout().lock();
        match client.exchange(&request, &mut stdout) {
            // Body already written; separate it from the next prompt.
            // Other headers print exactly as received.
            Ok(Response::Ok { .. }) => writeln!(stdout)?,
            Ok(response @ Response::Err { .. }) => eprintln!("{}", response),
            Ok(response @ Response::LastAccess(_)) => writeln!(stdout, "{}", response)?,
            Err(e) if e.leaves_stream_usable() => eprintln!("{}", e),
            Err(e) => return Err(e),
        }
    }
}
