//! Compressed file layout.
//!
//! The header persists the frequency table and nothing else; the decoder
//! rebuilds the tree from it.
//!
//! # Format
//!
//! ```text
//! +----------------------+
//! | entry_count (2)      |  u16 little-endian, 1-256
//! +----------------------+
//! | symbol (1)           |  repeated entry_count times,
//! | frequency (8)        |  u64 little-endian, ascending symbol
//! +----------------------+
//! | "--END HEADER--\n"   |  15-byte end marker
//! +----------------------+
//! | padding_bits (1)     |  0-7 zero bits at the end of the payload
//! +----------------------+
//! | payload              |  packed codes, MSB-first
//! | (variable)           |
//! +----------------------+
//! ```
//!
//! Records are fixed width, so symbol values that look like delimiters
//! (`,`, `:`, newline) need no escaping.

use crate::error::{HeaderError, PayloadError, Result};
use crate::frequency::{FrequencyTable, SYMBOL_COUNT};

/// Marker closing the frequency records.
pub const END_MARKER: &[u8] = b"--END HEADER--\n";

/// Bytes per `(symbol, frequency)` record.
pub const ENTRY_SIZE: usize = 9;

const COUNT_SIZE: usize = 2;

/// Parsed compressed file, borrowing the payload from the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container<'a> {
    /// Frequency table recovered from the header
    pub frequencies: FrequencyTable,
    /// Length of the header including the end marker
    pub header_len: usize,
    /// Zero bits appended after the last code
    pub padding_bits: u8,
    /// Packed payload bytes
    pub payload: &'a [u8],
}

/// Size in bytes of the header for `frequencies` (excluding padding byte).
pub fn header_len(frequencies: &FrequencyTable) -> usize {
    COUNT_SIZE + frequencies.len() * ENTRY_SIZE + END_MARKER.len()
}

/// Append the header for `frequencies` to `out`.
///
/// The table must not be empty; the codec rejects empty input before
/// getting here.
pub fn write_header(frequencies: &FrequencyTable, out: &mut Vec<u8>) {
    out.reserve(header_len(frequencies));

    let count = frequencies.len() as u16;
    out.extend_from_slice(&count.to_le_bytes());

    for (symbol, frequency) in frequencies.iter() {
        out.push(symbol);
        out.extend_from_slice(&frequency.to_le_bytes());
    }

    out.extend_from_slice(END_MARKER);
}

/// Serialize a complete compressed file.
pub fn write_container(frequencies: &FrequencyTable, padding_bits: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(header_len(frequencies) + 1 + payload.len());
    write_header(frequencies, &mut out);
    out.push(padding_bits);
    out.extend_from_slice(payload);
    out
}

/// Parse the header up to and including the end marker.
///
/// Returns the frequency table and the number of bytes consumed.
///
/// # Errors
/// - `HeaderError::Truncated` if the data ends inside the header
/// - `HeaderError::InvalidEntryCount` for a count of 0 or above 256
/// - `HeaderError::ZeroFrequency` / `UnorderedSymbol` for bad records
/// - `HeaderError::MissingEndMarker` if the marker does not follow the records
pub fn read_header(bytes: &[u8]) -> Result<(FrequencyTable, usize)> {
    let count_bytes: [u8; COUNT_SIZE] = bytes
        .get(..COUNT_SIZE)
        .and_then(|b| b.try_into().ok())
        .ok_or(HeaderError::Truncated {
            required: COUNT_SIZE,
            actual: bytes.len(),
        })?;
    let count = u16::from_le_bytes(count_bytes);

    if count == 0 || count as usize > SYMBOL_COUNT {
        return Err(HeaderError::InvalidEntryCount(count).into());
    }

    let records_end = COUNT_SIZE + count as usize * ENTRY_SIZE;
    let records = bytes
        .get(COUNT_SIZE..records_end)
        .ok_or(HeaderError::Truncated {
            required: records_end,
            actual: bytes.len(),
        })?;

    let entries = records.chunks_exact(ENTRY_SIZE).map(|record| {
        let mut frequency = [0u8; 8];
        frequency.copy_from_slice(&record[1..]);
        (record[0], u64::from_le_bytes(frequency))
    });
    let frequencies = FrequencyTable::from_entries(entries)?;

    let marker_end = records_end + END_MARKER.len();
    match bytes.get(records_end..marker_end) {
        Some(marker) if marker == END_MARKER => Ok((frequencies, marker_end)),
        _ => Err(HeaderError::MissingEndMarker.into()),
    }
}

/// Split a compressed file into its header, padding count and payload.
///
/// # Errors
/// Header errors as in [`read_header`], plus:
/// - `PayloadError::MissingPadding` if nothing follows the header
/// - `PayloadError::InvalidPadding` if the padding byte is above 7
pub fn read_container(bytes: &[u8]) -> Result<Container<'_>> {
    let (frequencies, header_len) = read_header(bytes)?;

    let padding_bits = *bytes.get(header_len).ok_or(PayloadError::MissingPadding)?;
    if padding_bits > 7 {
        return Err(PayloadError::InvalidPadding(padding_bits).into());
    }

    Ok(Container {
        frequencies,
        header_len,
        padding_bits,
        payload: &bytes[header_len + 1..],
    })
}
