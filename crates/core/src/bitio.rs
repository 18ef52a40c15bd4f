//! Bit-level I/O for the packed payload.
//!
//! BitWriter and BitReader both work MSB-first (most significant bit first),
//! so the first code bit lands in bit 7 of the first byte.
//!
//! # Padding Rules
//! - BitWriter: pads the last byte with `(8 - bits % 8) % 8` zero bits and
//!   reports that count alongside the bytes
//! - BitReader: given the same count, never yields the padding bits
//!
//! # Example
//! ```
//! use huffpack_core::bitio::{BitReader, BitWriter};
//! use huffpack_core::Code;
//!
//! let mut writer = BitWriter::new();
//! writer.write_code(&Code::from("10"));
//! writer.write_code(&Code::from("111"));
//! // 10111 -> padded to 10111000
//!
//! let packed = writer.finish();
//! assert_eq!(packed.bytes, vec![0b1011_1000]);
//! assert_eq!(packed.padding_bits, 3);
//!
//! let reader = BitReader::with_padding(&packed.bytes, packed.padding_bits).unwrap();
//! assert_eq!(reader.collect::<Vec<_>>(), [true, false, true, true, true]);
//! ```

use crate::code_table::Code;
use crate::error::{PayloadError, Result};

/// Output of [`BitWriter::finish`]: packed bytes plus the number of zero bits
/// appended to complete the last byte.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackedBits {
    /// Zero bits appended at the end (0-7)
    pub padding_bits: u8,
    /// Packed data, MSB-first
    pub bytes: Vec<u8>,
}

impl PackedBits {
    /// Number of meaningful bits (excluding padding).
    ///
    /// Saturates at zero when `padding_bits` claims more bits than `bytes` holds.
    pub fn bit_len(&self) -> usize {
        (self.bytes.len() * 8).saturating_sub(self.padding_bits as usize)
    }
}

/// Writes bits MSB-first into a byte buffer.
///
/// Accumulates bits in a buffer and flushes complete bytes to the output.
///
/// # Invariants
/// - `bit_buffer` contains up to 7 bits (never a full byte)
/// - `bit_count` is always < 8
#[derive(Debug, Clone)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    /// Create a new BitWriter with empty output.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a BitWriter expecting roughly `bytes` bytes of output.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 1 << (7 - self.bit_count);
        }
        self.bit_count += 1;

        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Write every bit of `code`, root side first.
    pub fn write_code(&mut self, code: &Code) {
        for &bit in code.bits() {
            self.write_bit(bit);
        }
    }

    /// Finish writing and return the packed bytes with their padding count.
    ///
    /// A trailing partial byte is completed with zeros (already zero in the
    /// buffer). This consumes the writer.
    pub fn finish(mut self) -> PackedBits {
        let padding_bits = (8 - self.bit_count) % 8;
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        PackedBits {
            padding_bits,
            bytes: self.bytes,
        }
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads bits MSB-first from a byte buffer.
///
/// # Invariants
/// - `bit_position` never exceeds `bit_len`
/// - `bit_len` is `data.len() * 8` minus the padding given at construction
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Source data
    data: &'a [u8],
    /// Number of readable bits
    bit_len: usize,
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader over every bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_len: data.len() * 8,
            bit_position: 0,
        }
    }

    /// Create a reader that stops before the last `padding_bits` bits.
    ///
    /// The padding count is validated by the header parser; here it only has
    /// to fit inside `data`.
    ///
    /// # Errors
    /// Returns `PayloadError::PaddingExceedsPayload` if `data` holds fewer
    /// bits than the padding.
    pub fn with_padding(data: &'a [u8], padding_bits: u8) -> Result<Self> {
        let available = data.len() * 8;
        let bit_len = available.checked_sub(padding_bits as usize).ok_or(
            PayloadError::PaddingExceedsPayload {
                padding: padding_bits,
                available,
            },
        )?;

        Ok(Self {
            data,
            bit_len,
            bit_position: 0,
        })
    }

    /// Read one bit, or `None` once the readable bits are exhausted.
    pub fn next_bit(&mut self) -> Option<bool> {
        if self.bit_position >= self.bit_len {
            return None;
        }
        let byte = self.data[self.bit_position / 8];
        let bit = (byte >> (7 - self.bit_position % 8)) & 1 == 1;
        self.bit_position += 1;
        Some(bit)
    }

    /// Return the number of readable bits left.
    pub fn bits_remaining(&self) -> usize {
        self.bit_len - self.bit_position
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.next_bit()
    }
}
