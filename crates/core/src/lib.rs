//! huffpack-core: Huffman prefix-code compression with a self-describing header
//!
//! This library compresses a whole byte buffer at a time:
//! - Counts byte frequencies
//! - Builds a Huffman tree with a fixed, history-independent tie-break
//! - Assigns prefix-free codes and packs them MSB-first
//! - Persists the frequency table so the decoder can rebuild the same tree
//!
//! # Architecture
//!
//! - `frequency`: Symbol counting
//! - `tree`: Priority-queue tree build
//! - `code_table`: Code assignment by tree traversal
//! - `bitio`: Low-level bit reading/writing with padding bookkeeping
//! - `header`: Persisted file layout
//! - `codec`: Encode/decode orchestration, in memory and on files
//! - `stats`: Per-call sizes and timing
//!
//! # Example
//! ```
//! let encoded = huffpack_core::encode(b"abracadabra").unwrap();
//! let decoded = huffpack_core::decode(&encoded.bytes).unwrap();
//! assert_eq!(decoded.bytes, b"abracadabra");
//! ```

pub mod bitio;
pub mod code_table;
pub mod codec;
pub mod error;
pub mod frequency;
pub mod header;
pub mod stats;
pub mod tree;

// Re-export commonly used types
pub use code_table::{Code, CodeTable};
pub use codec::{decode, decode_file, encode, encode_file, Decoded, Encoded};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use stats::CodecStats;
pub use tree::HuffmanTree;
