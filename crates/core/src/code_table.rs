//! Symbol to bit-string code assignment.
//!
//! Codes are read off the tree depth-first: `0` for every step left, `1` for
//! every step right, recorded when a leaf is reached. Since every internal
//! node has exactly two children, the resulting set of codes is prefix-free.

use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write;

use crate::frequency::FrequencyTable;
use crate::tree::{symbol_label, HuffmanTree, Node};

/// A variable-length code, most significant (root-side) bit first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    /// Number of bits in the code.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bits, root side first.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// True if `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }

    fn extended(&self, bit: bool) -> Code {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Code { bits }
    }
}

impl From<&str> for Code {
    /// Parse a string of `0`/`1` characters; anything else counts as `1`.
    fn from(s: &str) -> Self {
        Code {
            bits: s.chars().map(|c| c != '0').collect(),
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_char(if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Mapping from symbol to its code, ordered by symbol.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    /// Derive codes from a tree.
    ///
    /// A tree made of a single leaf gets the one-bit code `0`, since an
    /// empty code could not be decoded.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();

        match tree.root() {
            Node::Leaf { symbol, .. } => {
                codes.insert(*symbol, Code::from("0"));
            }
            root => collect(root, Code::default(), &mut codes),
        }

        Self { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Symbols and their codes, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Code length per symbol.
    pub fn code_lengths(&self) -> BTreeMap<u8, usize> {
        self.iter().map(|(symbol, code)| (symbol, code.len())).collect()
    }

    /// Longest code in the table (0 when empty).
    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }

    /// Total payload bits for data with these frequencies.
    ///
    /// Symbols missing from the table contribute nothing. Saturates rather
    /// than overflowing on frequencies read from a tampered header.
    pub fn encoded_bit_len(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| {
                self.get(symbol)
                    .map(|c| (c.len() as u64).saturating_mul(count))
            })
            .fold(0u64, u64::saturating_add)
    }

    /// Check that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        // In lexicographic order, a prefix sorts directly before some code
        // it prefixes, so comparing neighbours is enough.
        let mut sorted: Vec<&Code> = self.codes.values().collect();
        sorted.sort_by(|a, b| a.bits.cmp(&b.bits));
        sorted.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }

    /// Human-readable `symbol : code` listing.
    pub fn render(&self) -> String {
        let mut out = String::from("Symbol : Code\n");
        for (symbol, code) in self.iter() {
            let _ = writeln!(out, "{} : {}", symbol_label(symbol), code);
        }
        out
    }
}

fn collect(node: &Node, prefix: Code, codes: &mut BTreeMap<u8, Code>) {
    match node {
        Node::Leaf { symbol, .. } => {
            codes.insert(*symbol, prefix);
        }
        Node::Internal { left, right, .. } => {
            collect(left, prefix.extended(false), codes);
            collect(right, prefix.extended(true), codes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_for(data: &[u8]) -> (FrequencyTable, CodeTable) {
        let freqs = FrequencyTable::from_bytes(data);
        let tree = HuffmanTree::build(&freqs).unwrap();
        (freqs, CodeTable::from_tree(&tree))
    }

    #[test]
    fn test_single_symbol_gets_zero() {
        let (_, codes) = table_for(b"aaaa");
        assert_eq!(codes.len(), 1);
        assert_eq!(codes.get(b'a').unwrap().to_string(), "0");
    }

    #[test]
    fn test_two_symbols() {
        let (_, codes) = table_for(b"abb");
        assert_eq!(codes.get(b'a').unwrap().to_string(), "0");
        assert_eq!(codes.get(b'b').unwrap().to_string(), "1");
    }

    #[test]
    fn test_frequent_symbols_get_shorter_codes() {
        let (_, codes) = table_for(b"aaaaaaaabbbbccd");
        let a = codes.get(b'a').unwrap().len();
        let b = codes.get(b'b').unwrap().len();
        let d = codes.get(b'd').unwrap().len();
        assert!(a <= b);
        assert!(b <= d);
        assert_eq!(codes.max_code_len(), d);
    }

    #[test]
    fn test_every_symbol_has_code() {
        let data: Vec<u8> = (0..=255).collect();
        let (freqs, codes) = table_for(&data);
        assert_eq!(codes.len(), 256);
        for (symbol, _) in freqs.iter() {
            assert!(codes.get(symbol).is_some());
        }
        // Equal weights over 256 symbols give a perfect tree
        assert!(codes.iter().all(|(_, c)| c.len() == 8));
    }

    #[test]
    fn test_prefix_free() {
        let (_, codes) = table_for(b"she sells sea shells by the sea shore");
        assert!(codes.is_prefix_free());
    }

    #[test]
    fn test_prefix_check_detects_violation() {
        let mut codes = BTreeMap::new();
        codes.insert(b'a', Code::from("01"));
        codes.insert(b'b', Code::from("011"));
        codes.insert(b'c', Code::from("1"));
        let table = CodeTable { codes };
        assert!(!table.is_prefix_free());
    }

    #[test]
    fn test_encoded_bit_len() {
        let (freqs, codes) = table_for(b"abb");
        assert_eq!(codes.encoded_bit_len(&freqs), 3);

        let (freqs, codes) = table_for(b"aaaa");
        assert_eq!(codes.encoded_bit_len(&freqs), 4);
    }

    #[test]
    fn test_render() {
        let (_, codes) = table_for(b"a\nb\nb");
        let rendered = codes.render();
        assert!(rendered.starts_with("Symbol : Code\n"));
        assert!(rendered.contains("0x0a : "));
        assert!(rendered.contains("'a' : "));
    }
}
