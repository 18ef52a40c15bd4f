//! Error types for the huffpack codec.
//!
//! All operations return structured errors rather than panicking. Every
//! error is terminal for the encode/decode call that produced it; nothing in
//! the codec retries.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// Each variant corresponds to a specific failure domain:
/// - Input validation: missing, unreadable or empty input
/// - Header: the persisted frequency table cannot be parsed
/// - Payload: the packed bitstream does not match the rebuilt tree
/// - Huffman: internal tree and code construction failures
/// - I/O: output file operations
#[derive(Debug, Error)]
pub enum Error {
    /// Input path does not exist
    #[error("input not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// Input path exists but cannot be read
    #[error("input unreadable: {}: {source}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Zero-length input handed to the encoder
    #[error("input is empty: nothing to encode")]
    EmptyInput,

    /// Header could not be parsed back into a frequency table
    #[error("malformed header: {0}")]
    MalformedHeader(#[from] HeaderError),

    /// Packed payload is inconsistent with the header
    #[error("corrupt payload: {0}")]
    CorruptPayload(#[from] PayloadError),

    /// Huffman tree or code construction failed
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Output (or other file) operation failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Classify an error raised while opening or reading the input file.
    pub(crate) fn input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Error::InputNotFound { path },
            _ => Error::InputUnreadable { path, source },
        }
    }

    /// Wrap an error raised while writing the output file.
    pub(crate) fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Huffman codec errors.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// No symbols with non-zero frequency (cannot build a tree)
    #[error("empty frequency table: cannot build tree")]
    EmptyFrequencyTable,

    /// A symbol in the input has no code in the table
    #[error("symbol {symbol:#04x} has no code")]
    MissingCode { symbol: u8 },
}

/// Reasons a persisted header is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    /// Data ended before the header was complete
    #[error("header truncated: need {required} bytes, got {actual}")]
    Truncated { required: usize, actual: usize },

    /// Entry count outside 1..=256
    #[error("invalid entry count {0} (must be 1-256)")]
    InvalidEntryCount(u16),

    /// A symbol was recorded with a zero frequency
    #[error("symbol {symbol:#04x} has zero frequency")]
    ZeroFrequency { symbol: u8 },

    /// Symbols are not strictly ascending (duplicate or out of order)
    #[error("symbol {symbol:#04x} out of order after {previous:#04x}")]
    UnorderedSymbol { previous: u8, symbol: u8 },

    /// End-of-header marker missing after the entries
    #[error("missing end-of-header marker")]
    MissingEndMarker,

    /// Frequencies sum past the addressable range
    #[error("frequency total overflows")]
    FrequencyOverflow,
}

/// Reasons a packed payload is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// Padding byte missing after the header
    #[error("missing padding byte")]
    MissingPadding,

    /// Padding byte outside 0-7
    #[error("invalid padding count {0} (must be 0-7)")]
    InvalidPadding(u8),

    /// Padding claims more bits than the payload holds
    #[error("padding {padding} exceeds payload of {available} bits")]
    PaddingExceedsPayload { padding: u8, available: usize },

    /// Payload bit length disagrees with the header's frequencies
    #[error("payload has {actual} bits, header implies {expected}")]
    BitLengthMismatch { expected: u64, actual: u64 },

    /// Bitstream ended partway down the tree
    #[error("bitstream ends mid-code at bit {position}")]
    TruncatedCode { position: usize },

    /// Bit sequence that no code produces
    #[error("invalid code at bit {position}")]
    InvalidCode { position: usize },

    /// Decoded symbol count disagrees with the header
    #[error("decoded {actual} symbols, header implies {expected}")]
    LengthMismatch { expected: u64, actual: u64 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
