//! huffpack: compress and restore files with Huffman prefix codes.
//!
//! ```text
//! huffpack encode <INPUT> -o <OUTPUT>
//! huffpack decode [INPUT] [-o OUTPUT]
//! ```
//!
//! Exit code 0 on success, 1 on any usage, validation, format or I/O failure.

mod config;
mod logging;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use huffpack_core::{CodeTable, CodecStats, HuffmanTree};
use tracing::debug;

use config::{Cli, Config, Mode, ReportArgs, StatsFormat};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version exit 0
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    let config = match Config::from_cli(cli) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("error: {msg}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&config) {
        eprintln!("warning: {e:#}");
    }

    debug!(?config, "resolved configuration");

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<()> {
    match config.mode {
        Mode::Encode => {
            let encoded = huffpack_core::encode_file(&config.input, &config.output)
                .with_context(|| format!("failed to encode {}", config.input.display()))?;
            report(&config.report, &encoded.tree, &encoded.codes, &encoded.stats);
            println!("File compressed and saved as {}", config.output.display());
        }
        Mode::Decode => {
            let decoded = huffpack_core::decode_file(&config.input, &config.output)
                .with_context(|| format!("failed to decode {}", config.input.display()))?;
            report(&config.report, &decoded.tree, &decoded.codes, &decoded.stats);
            println!("File decoded and saved as {}", config.output.display());
        }
    }
    Ok(())
}

fn report(args: &ReportArgs, tree: &HuffmanTree, codes: &CodeTable, stats: &CodecStats) {
    if args.print_tree {
        print!("{}", tree.render());
    }
    if args.print_codes {
        print!("{}", codes.render());
    }
    match args.stats {
        Some(StatsFormat::Summary) => print!("{}", stats.summary()),
        Some(StatsFormat::Kv) => print!("{}", stats.export_text()),
        None => {}
    }
}
