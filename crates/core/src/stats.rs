//! Per-call statistics for encode and decode.
//!
//! Every codec call returns a [`CodecStats`] describing sizes, code shape and
//! timing. Stats are owned by the call that produced them; nothing is shared
//! between calls.

use std::fmt::Write;
use std::time::{Duration, Instant};

/// Which direction a [`CodecStats`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Encode,
    Decode,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Encode => "encode",
            Operation::Decode => "decode",
        }
    }
}

/// Sizes, code shape and timing for one encode or decode call.
#[derive(Debug, Clone)]
pub struct CodecStats {
    pub operation: Operation,

    // === Sizes ===
    /// Bytes handed to the call
    pub input_bytes: u64,

    /// Bytes produced by the call
    pub output_bytes: u64,

    /// Header bytes (frequency records + end marker)
    pub header_bytes: u64,

    // === Code shape ===
    /// Distinct symbols in the frequency table
    pub distinct_symbols: usize,

    /// Meaningful payload bits (excluding padding)
    pub payload_bits: u64,

    /// Zero bits padding the last payload byte
    pub padding_bits: u8,

    /// Longest code assigned
    pub max_code_len: usize,

    // === Timing ===
    pub elapsed: Duration,
}

impl CodecStats {
    pub(crate) fn new(operation: Operation) -> Self {
        Self {
            operation,
            input_bytes: 0,
            output_bytes: 0,
            header_bytes: 0,
            distinct_symbols: 0,
            payload_bits: 0,
            padding_bits: 0,
            max_code_len: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub(crate) fn finish(mut self, started: Instant) -> Self {
        self.elapsed = started.elapsed();
        self
    }

    /// Uncompressed length in bytes, whichever side of the call it is on.
    pub fn raw_bytes(&self) -> u64 {
        match self.operation {
            Operation::Encode => self.input_bytes,
            Operation::Decode => self.output_bytes,
        }
    }

    /// Compressed length in bytes, whichever side of the call it is on.
    pub fn compressed_bytes(&self) -> u64 {
        match self.operation {
            Operation::Encode => self.output_bytes,
            Operation::Decode => self.input_bytes,
        }
    }

    /// Compute compression ratio (compressed / raw).
    ///
    /// Returns 0.0 if no raw data.
    pub fn compression_ratio(&self) -> f64 {
        let raw = self.raw_bytes();
        if raw == 0 {
            0.0
        } else {
            self.compressed_bytes() as f64 / raw as f64
        }
    }

    /// Average payload bits per symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        let raw = self.raw_bytes();
        if raw == 0 {
            0.0
        } else {
            self.payload_bits as f64 / raw as f64
        }
    }

    /// Human-readable summary block.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== {} summary ===", self.operation.as_str());
        let _ = writeln!(out, "Input:  {} bytes", self.input_bytes);
        let _ = writeln!(out, "Output: {} bytes", self.output_bytes);
        let _ = writeln!(out, "Header: {} bytes", self.header_bytes);
        let _ = writeln!(
            out,
            "Payload: {} bits (+{} padding)",
            self.payload_bits, self.padding_bits
        );
        let _ = writeln!(out, "Symbols: {} distinct", self.distinct_symbols);
        let _ = writeln!(out, "Longest code: {} bits", self.max_code_len);
        let _ = writeln!(out, "Bits/symbol: {:.3}", self.bits_per_symbol());
        let _ = writeln!(out, "Ratio: {:.1}%", self.compression_ratio() * 100.0);
        let _ = writeln!(out, "Time: {} us", self.elapsed.as_micros());
        out
    }

    /// Export as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "operation={}\n\
             input_bytes={}\n\
             output_bytes={}\n\
             header_bytes={}\n\
             distinct_symbols={}\n\
             payload_bits={}\n\
             padding_bits={}\n\
             max_code_len={}\n\
             compression_ratio={:.4}\n\
             elapsed_us={}\n",
            self.operation.as_str(),
            self.input_bytes,
            self.output_bytes,
            self.header_bytes,
            self.distinct_symbols,
            self.payload_bits,
            self.padding_bits,
            self.max_code_len,
            self.compression_ratio(),
            self.elapsed.as_micros(),
        )
    }
}
