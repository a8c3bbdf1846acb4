//! `form-parse` - rebuild a flat form submission (stdin) as nested JSON (stdout).
//!
//! Usage:
//!   form-parse [--lines]
//!
//! By default stdin is an `application/x-www-form-urlencoded` body. With
//! `--lines` every non-blank line is one `name=value` entry.
//!
//! Set `RUST_LOG=debug` to see reconstruction events on stderr.

use form_chain::{entries_from_lines, entries_from_urlencoded, parse_form_any};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut lines = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--lines" => lines = true,
            other => {
                eprintln!("Unknown argument: {other}");
                std::process::exit(1);
            }
        }
    }

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let entries = if lines {
        entries_from_lines(&buf)
    } else {
        entries_from_urlencoded(buf.trim().as_bytes())
    };

    let tree = match parse_form_any(entries) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let rendered = match serde_json::to_string_pretty(&tree.to_json()) {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let mut stdout = io::stdout();
    if let Err(e) = writeln!(stdout, "{rendered}") {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
