//! Encode and decode entry points.
//!
//! Encode: bytes -> frequency table -> tree -> code table -> header ++ payload.
//! Decode: header -> frequency table -> tree (rebuilt) -> payload walk -> bytes.
//!
//! Every call owns its own table, tree and codes; nothing is cached or shared
//! between calls. A corrupt payload fails the whole decode: no partially
//! decoded output is returned or written.

use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, instrument, trace, Level};

use crate::bitio::{BitReader, BitWriter};
use crate::code_table::CodeTable;
use crate::error::{Error, HuffmanError, PayloadError, Result};
use crate::frequency::FrequencyTable;
use crate::header::{self, Container};
use crate::stats::{CodecStats, Operation};
use crate::tree::{HuffmanTree, Node};

/// Result of a successful encode.
#[derive(Debug, Clone)]
pub struct Encoded {
    /// Complete compressed file (header, padding byte, payload)
    pub bytes: Vec<u8>,
    pub frequencies: FrequencyTable,
    pub tree: HuffmanTree,
    pub codes: CodeTable,
    pub stats: CodecStats,
}

/// Result of a successful decode.
#[derive(Debug, Clone)]
pub struct Decoded {
    /// The original data
    pub bytes: Vec<u8>,
    pub frequencies: FrequencyTable,
    pub tree: HuffmanTree,
    pub codes: CodeTable,
    pub stats: CodecStats,
}

/// Compress `data` into the huffpack format.
///
/// # Errors
/// - `Error::EmptyInput` if `data` is empty
pub fn encode(data: &[u8]) -> Result<Encoded> {
    let started = Instant::now();

    if data.is_empty() {
        return Err(Error::EmptyInput);
    }

    let frequencies = FrequencyTable::from_bytes(data);
    let tree = HuffmanTree::build(&frequencies)?;
    let codes = CodeTable::from_tree(&tree);

    debug!(
        distinct = frequencies.len(),
        total = frequencies.total(),
        "built frequency table"
    );
    trace!("huffman tree:\n{}", tree.render());
    debug!("code table:\n{}", codes.render());

    let payload_bits = codes.encoded_bit_len(&frequencies);
    let mut writer = BitWriter::with_capacity(payload_bits.div_ceil(8) as usize);
    for &byte in data {
        let code = codes
            .get(byte)
            .ok_or(HuffmanError::MissingCode { symbol: byte })?;
        writer.write_code(code);
    }
    let packed = writer.finish();

    if tracing::enabled!(Level::TRACE) {
        trace!(bits = %bit_string(&packed.bytes, packed.bit_len()), "packed payload");
    }
    debug!(
        payload_bits = packed.bit_len(),
        padding_bits = packed.padding_bits,
        "packed payload"
    );

    let bytes = header::write_container(&frequencies, packed.padding_bits, &packed.bytes);

    let mut stats = CodecStats::new(Operation::Encode);
    stats.input_bytes = data.len() as u64;
    stats.output_bytes = bytes.len() as u64;
    stats.header_bytes = header::header_len(&frequencies) as u64;
    stats.distinct_symbols = frequencies.len();
    stats.payload_bits = packed.bit_len() as u64;
    stats.padding_bits = packed.padding_bits;
    stats.max_code_len = codes.max_code_len();

    Ok(Encoded {
        bytes,
        frequencies,
        tree,
        codes,
        stats: stats.finish(started),
    })
}

/// Restore the original data from a huffpack file.
///
/// # Errors
/// - `Error::MalformedHeader` if the frequency header cannot be parsed
/// - `Error::CorruptPayload` if the bitstream does not decode exactly to the
///   number of symbols the header records
pub fn decode(data: &[u8]) -> Result<Decoded> {
    let started = Instant::now();

    let Container {
        frequencies,
        header_len,
        padding_bits,
        payload,
    } = header::read_container(data)?;

    let tree = HuffmanTree::build(&frequencies)?;
    let codes = CodeTable::from_tree(&tree);

    debug!(
        distinct = frequencies.len(),
        total = frequencies.total(),
        padding_bits,
        "parsed header"
    );
    trace!("rebuilt huffman tree:\n{}", tree.render());
    debug!("code table:\n{}", codes.render());

    let reader = BitReader::with_padding(payload, padding_bits)?;

    let expected_bits = codes.encoded_bit_len(&frequencies);
    let actual_bits = reader.bits_remaining() as u64;
    if actual_bits != expected_bits {
        return Err(PayloadError::BitLengthMismatch {
            expected: expected_bits,
            actual: actual_bits,
        }
        .into());
    }

    if tracing::enabled!(Level::TRACE) {
        trace!(bits = %bit_string(payload, reader.bits_remaining()), "payload after padding trim");
    }

    // Every code is at least one bit, so the bit check above bounds this.
    let bytes = walk(&tree, reader, frequencies.total() as usize)?;

    let mut stats = CodecStats::new(Operation::Decode);
    stats.input_bytes = data.len() as u64;
    stats.output_bytes = bytes.len() as u64;
    stats.header_bytes = header_len as u64;
    stats.distinct_symbols = frequencies.len();
    stats.payload_bits = actual_bits;
    stats.padding_bits = padding_bits;
    stats.max_code_len = codes.max_code_len();

    Ok(Decoded {
        bytes,
        frequencies,
        tree,
        codes,
        stats: stats.finish(started),
    })
}

/// Decode the bitstream by walking the tree from the root.
fn walk(tree: &HuffmanTree, reader: BitReader<'_>, expected: usize) -> Result<Vec<u8>> {
    let root = tree.root();
    let mut out = Vec::with_capacity(expected);

    match root {
        // Single symbol: every code is the one bit `0`
        Node::Leaf { symbol, .. } => {
            for (position, bit) in reader.enumerate() {
                if bit {
                    return Err(PayloadError::InvalidCode { position }.into());
                }
                out.push(*symbol);
            }
        }
        Node::Internal { .. } => {
            let mut node = root;
            let mut depth = 0;
            let mut position = 0;

            for bit in reader {
                node = node
                    .child(bit)
                    .ok_or(PayloadError::InvalidCode { position })?;
                depth += 1;
                position += 1;

                if let Node::Leaf { symbol, .. } = node {
                    out.push(*symbol);
                    node = root;
                    depth = 0;
                }
            }

            if depth != 0 {
                return Err(PayloadError::TruncatedCode {
                    position: position - depth,
                }
                .into());
            }
        }
    }

    if out.len() != expected {
        return Err(PayloadError::LengthMismatch {
            expected: expected as u64,
            actual: out.len() as u64,
        }
        .into());
    }

    Ok(out)
}

/// Read `input`, compress it and write the result to `output`.
///
/// The input is validated before `output` is created, so a missing or empty
/// input never leaves an output file behind.
#[instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
pub fn encode_file(input: &Path, output: &Path) -> Result<Encoded> {
    let data = fs::read(input).map_err(|e| Error::input(input, e))?;
    let encoded = encode(&data)?;

    fs::write(output, &encoded.bytes).map_err(|e| Error::output(output, e))?;

    info!(
        input_bytes = encoded.stats.input_bytes,
        output_bytes = encoded.stats.output_bytes,
        "compressed"
    );
    Ok(encoded)
}

/// Read a huffpack file from `input`, decode it and write the original data
/// to `output`.
///
/// Decoding completes in memory first; `output` is only touched once the
/// whole payload has been validated.
#[instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
pub fn decode_file(input: &Path, output: &Path) -> Result<Decoded> {
    let data = fs::read(input).map_err(|e| Error::input(input, e))?;
    let decoded = decode(&data)?;

    fs::write(output, &decoded.bytes).map_err(|e| Error::output(output, e))?;

    info!(
        input_bytes = decoded.stats.input_bytes,
        output_bytes = decoded.stats.output_bytes,
        "decompressed"
    );
    Ok(decoded)
}

/// `0`/`1` rendering of the first `bit_len` bits of `bytes`.
fn bit_string(bytes: &[u8], bit_len: usize) -> String {
    BitReader::new(bytes)
        .take(bit_len)
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}
