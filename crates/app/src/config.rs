//! Configuration for the huffpack command-line tool.
//!
//! Arguments are parsed with clap, then resolved into a [`Config`] holding
//! everything the run needs: which direction, which files, how loud to log
//! and which diagnostics to print.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Compressed file read by `decode` when no input is given.
pub const DEFAULT_ENCODED_FILE: &str = "compressed_output.huff";

/// File written by `decode` when no output is given.
pub const DEFAULT_DECODED_FILE: &str = "decompressed_output.txt";

/// Huffman prefix-code compressor.
#[derive(Parser, Debug)]
#[command(author, version, about = "Huffman prefix-code compressor", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress a file
    Encode {
        /// File to compress
        input: PathBuf,

        /// Where to write the compressed file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Restore a compressed file
    Decode {
        /// Compressed file to read
        #[arg(default_value = DEFAULT_ENCODED_FILE)]
        input: PathBuf,

        /// Where to write the restored data
        #[arg(short, long, default_value = DEFAULT_DECODED_FILE)]
        output: PathBuf,

        #[command(flatten)]
        report: ReportArgs,
    },
}

/// Diagnostics printed to stdout after the operation.
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportArgs {
    /// Print the symbol to code table
    #[arg(long)]
    pub print_codes: bool,

    /// Print the Huffman tree
    #[arg(long)]
    pub print_tree: bool,

    /// Print size/timing statistics (`--stats` or `--stats=kv`)
    #[arg(
        long,
        value_enum,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "summary"
    )]
    pub stats: Option<StatsFormat>,
}

/// Layout of the `--stats` report.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsFormat {
    /// Human-readable summary block
    Summary,
    /// One `key=value` pair per line
    Kv,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Plain,
    Compact,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encode,
    Decode,
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,

    // === Files ===
    pub input: PathBuf,
    pub output: PathBuf,

    // === Logging ===
    /// Default filter directive when `RUST_LOG` is unset
    pub log_level: &'static str,
    pub log_format: LogFormat,

    // === Behavior ===
    pub report: ReportArgs,
}

impl Config {
    /// Resolve parsed arguments into a run configuration.
    ///
    /// # Errors
    /// Returns an error if input and output name the same file, which would
    /// truncate the input before it is read back.
    pub fn from_cli(cli: Cli) -> Result<Self, String> {
        let (mode, input, output, report) = match cli.command {
            Command::Encode {
                input,
                output,
                report,
            } => (Mode::Encode, input, output, report),
            Command::Decode {
                input,
                output,
                report,
            } => (Mode::Decode, input, output, report),
        };

        if input == output {
            return Err(format!(
                "input and output are the same file: {}",
                input.display()
            ));
        }

        let log_level = match (cli.quiet, cli.verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "debug",
            (false, _) => "trace",
        };

        Ok(Config {
            mode,
            input,
            output,
            log_level,
            log_format: cli.log_format,
            report,
        })
    }
}
