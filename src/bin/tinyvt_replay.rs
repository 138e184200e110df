//! tinyvt replay tool
//!
//! Feeds a captured byte stream through a headless terminal and prints the
//! resulting screen. Useful for reproducing fuzz findings and for checking
//! that chunked input gives the same screen as whole input.

use std::io::{self, Read};
use std::process::ExitCode;

use tinyvt::{Snapshot, Terminal, TerminalConfig};

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut config = TerminalConfig::default();
    let mut cols: Option<i32> = None;
    let mut rows: Option<i32> = None;
    let mut chunk: Option<usize> = None;
    let mut input_file: Option<String> = None;
    let mut output_format = OutputFormat::Text;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--cols" => {
                i += 1;
                cols = args.get(i).and_then(|v| v.parse().ok());
            },
            "-r" | "--rows" => {
                i += 1;
                rows = args.get(i).and_then(|v| v.parse().ok());
            },
            "-n" | "--chunk" => {
                i += 1;
                chunk = args.get(i).and_then(|v| v.parse().ok()).filter(|&n| n > 0);
            },
            "--config" => {
                i += 1;
                let Some(path) = args.get(i) else {
                    eprintln!("--config needs a path");
                    return ExitCode::FAILURE;
                };
                config = match TerminalConfig::load(path) {
                    Ok(config) => config,
                    Err(e) => {
                        eprintln!("Error loading config '{}': {}", path, e);
                        return ExitCode::FAILURE;
                    },
                };
            },
            "-j" | "--json" => output_format = OutputFormat::Json,
            "-t" | "--text" => output_format = OutputFormat::Text,
            "-h" | "--help" => {
                print_help();
                return ExitCode::SUCCESS;
            },
            arg => {
                if input_file.is_none() && !arg.starts_with('-') {
                    input_file = Some(arg.to_string());
                }
            },
        }
        i += 1;
    }

    if let Some(cols) = cols {
        config.columns = cols;
    }
    if let Some(rows) = rows {
        config.rows = rows;
    }

    let mut term = match Terminal::with_config(&config) {
        Ok(term) => term,
        Err(e) => {
            eprintln!("Error creating terminal: {}", e);
            return ExitCode::FAILURE;
        },
    };

    let input_data = match &input_file {
        Some(path) => match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path, e);
                return ExitCode::FAILURE;
            },
        },
        None => {
            let mut data = Vec::new();
            if let Err(e) = io::stdin().read_to_end(&mut data) {
                eprintln!("Error reading stdin: {}", e);
                return ExitCode::FAILURE;
            }
            data
        },
    };

    info!(bytes = input_data.len(), ?chunk, "replaying input");
    match chunk {
        Some(n) => input_data.chunks(n).for_each(|c| term.process_bytes(c)),
        None => term.process_bytes(&input_data),
    }
    if term.decoder().pending_len() > 0 {
        info!(pending = term.decoder().pending_len(), "input ends inside a sequence");
    }

    match output_format {
        OutputFormat::Text => {
            let size = term.size();
            let cursor = term.cursor();
            println!("Terminal State ({}x{}):", size.width, size.height);
            println!("Cursor: {}", cursor.pos);
            println!("---");
            print!("{}", term.dump());
            println!("---");
        },
        OutputFormat::Json => match Snapshot::from_terminal(&term).to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing snapshot: {}", e);
                return ExitCode::FAILURE;
            },
        },
    }

    ExitCode::SUCCESS
}

#[derive(Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn print_help() {
    println!("tinyvt replay");
    println!();
    println!("Usage: tinyvt-replay [OPTIONS] [INPUT_FILE]");
    println!();
    println!("Options:");
    println!("  -c, --cols <N>       Set terminal width (default: 80)");
    println!("  -r, --rows <N>       Set terminal height (default: 25)");
    println!("  -n, --chunk <N>      Feed input in chunks of N bytes");
    println!("      --config <PATH>  Load a JSON terminal configuration");
    println!("  -j, --json           Output snapshot as JSON");
    println!("  -t, --text           Output screen as text (default)");
    println!("  -h, --help           Show this help message");
    println!();
    println!("If no input file is specified, reads from stdin.");
}
