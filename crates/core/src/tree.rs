//! Huffman tree construction.
//!
//! The tree is built bottom-up from a [`FrequencyTable`] with a min-priority
//! queue: the two lightest nodes are merged until one root remains.
//!
//! # Tie-break
//!
//! Equal frequencies are resolved by a rank that does not depend on
//! insertion history:
//! - a leaf's rank is its symbol value (0-255)
//! - internal nodes are ranked 256, 257, ... in creation order
//!
//! The queue pops the smallest `(frequency, rank)` pair. The first node popped
//! becomes the left child, the second the right child. Encoder and decoder
//! both go through [`HuffmanTree::build`], so they always agree on the shape.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Write;

use crate::error::{HuffmanError, Result};
use crate::frequency::{FrequencyTable, SYMBOL_COUNT};

/// A node of the Huffman tree. Each internal node owns both children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Child reached by `bit` (false = left, true = right); `None` at a leaf.
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Queue entry pairing a subtree with its tie-break rank.
struct Ranked {
    rank: usize,
    node: Node,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (lighter, then lower rank, pops first)
        (other.node.weight(), other.rank).cmp(&(self.node.weight(), self.rank))
    }
}

/// A Huffman tree built from a frequency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
    symbols: usize,
}

impl HuffmanTree {
    /// Build the tree for `frequencies`.
    ///
    /// # Errors
    /// Returns `HuffmanError::EmptyFrequencyTable` if no symbol occurs.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        let mut queue: BinaryHeap<Ranked> = frequencies
            .iter()
            .map(|(symbol, weight)| Ranked {
                rank: symbol as usize,
                node: Node::Leaf { symbol, weight },
            })
            .collect();

        let symbols = queue.len();
        let mut next_rank = SYMBOL_COUNT;

        while queue.len() > 1 {
            let (Some(first), Some(second)) = (queue.pop(), queue.pop()) else {
                break;
            };

            let merged = Node::Internal {
                weight: first.node.weight() + second.node.weight(),
                left: Box::new(first.node),
                right: Box::new(second.node),
            };
            queue.push(Ranked {
                rank: next_rank,
                node: merged,
            });
            next_rank += 1;
        }

        let root = queue
            .pop()
            .ok_or(HuffmanError::EmptyFrequencyTable)?
            .node;

        Ok(Self { root, symbols })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of leaves (distinct symbols).
    pub fn symbol_count(&self) -> usize {
        self.symbols
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Multi-line dump, right subtree above left, indented by depth.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_node(&self.root, 0, &mut out);
        out
    }
}

fn render_node(node: &Node, indent: usize, out: &mut String) {
    match node {
        Node::Leaf { symbol, weight } => {
            let _ = writeln!(out, "{:indent$}{}: {}", "", symbol_label(*symbol), weight);
        }
        Node::Internal {
            weight,
            left,
            right,
        } => {
            render_node(right, indent + 4, out);
            let _ = writeln!(out, "{:indent$}Node: {}", "", weight);
            render_node(left, indent + 4, out);
        }
    }
}

/// Printable form of a symbol: quoted if graphic ASCII, hex otherwise.
pub(crate) fn symbol_label(symbol: u8) -> String {
    if symbol.is_ascii_graphic() || symbol == b' ' {
        format!("'{}'", symbol as char)
    } else {
        format!("{:#04x}", symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_for(data: &[u8]) -> HuffmanTree {
        HuffmanTree::build(&FrequencyTable::from_bytes(data)).unwrap()
    }

    #[test]
    fn test_empty_table_fails() {
        let result = HuffmanTree::build(&FrequencyTable::from_bytes(b""));
        assert!(matches!(
            result,
            Err(crate::error::Error::Huffman(HuffmanError::EmptyFrequencyTable))
        ));
    }

    #[test]
    fn test_single_symbol_is_leaf_root() {
        let tree = tree_for(b"aaaa");
        assert_eq!(
            tree.root(),
            &Node::Leaf {
                symbol: b'a',
                weight: 4
            }
        );
        assert_eq!(tree.symbol_count(), 1);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_two_symbols() {
        let tree = tree_for(b"abb");
        let root = tree.root();
        assert_eq!(root.weight(), 3);
        // Lighter 'a' is popped first and becomes the left child
        assert_eq!(
            root.child(false),
            Some(&Node::Leaf {
                symbol: b'a',
                weight: 1
            })
        );
        assert_eq!(
            root.child(true),
            Some(&Node::Leaf {
                symbol: b'b',
                weight: 2
            })
        );
    }

    #[test]
    fn test_ties_break_by_symbol() {
        // All weights equal: lower symbol pops first and lands on the left
        let tree = tree_for(b"ba");
        assert_eq!(
            tree.root().child(false),
            Some(&Node::Leaf {
                symbol: b'a',
                weight: 1
            })
        );
    }

    #[test]
    fn test_leaf_beats_internal_on_tie() {
        // a:1 b:1 merge into an internal node of weight 2, which ties with c:2.
        // c has the lower rank, so it is popped first and goes left.
        let tree = tree_for(b"abcc");
        let root = tree.root();
        assert_eq!(root.weight(), 4);
        assert_eq!(
            root.child(false),
            Some(&Node::Leaf {
                symbol: b'c',
                weight: 2
            })
        );
        assert!(!root.child(true).unwrap().is_leaf());
    }

    #[test]
    fn test_root_weight_is_total() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let tree = tree_for(data);
        assert_eq!(tree.root().weight(), data.len() as u64);
        assert_eq!(
            tree.symbol_count(),
            FrequencyTable::from_bytes(data).len()
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let table = FrequencyTable::from_bytes(b"mississippi river banks");
        assert_eq!(
            HuffmanTree::build(&table).unwrap(),
            HuffmanTree::build(&table).unwrap()
        );
    }

    #[test]
    fn test_render() {
        let tree = tree_for(b"abb");
        let rendered = tree.render();
        assert_eq!(rendered, "    'b': 2\nNode: 3\n    'a': 1\n");
    }

    #[test]
    fn test_symbol_label() {
        assert_eq!(symbol_label(b'x'), "'x'");
        assert_eq!(symbol_label(b'\n'), "0x0a");
        assert_eq!(symbol_label(0xff), "0xff");
    }
}
