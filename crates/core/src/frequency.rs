//! Symbol frequency model.
//!
//! A [`FrequencyTable`] counts how often each byte value occurs. It is the
//! only state persisted in the compressed header, so the decoder rebuilds the
//! exact same tree from it.
//!
//! Iteration is always in ascending symbol order, independent of how the
//! table was built.

use crate::error::HeaderError;

/// Number of distinct symbols (one per byte value).
pub const SYMBOL_COUNT: usize = 256;

/// Occurrence counts per byte value.
///
/// # Invariants
/// - Every symbol reported by [`iter`](Self::iter) has a count > 0
/// - `total()` equals the number of symbols the table was built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; SYMBOL_COUNT],
    distinct: usize,
    total: u64,
}

impl FrequencyTable {
    /// Count every byte in `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; SYMBOL_COUNT];
        for &byte in data {
            counts[byte as usize] += 1;
        }

        let distinct = counts.iter().filter(|&&c| c > 0).count();

        Self {
            counts,
            distinct,
            total: data.len() as u64,
        }
    }

    /// Rebuild a table from persisted `(symbol, count)` entries.
    ///
    /// Entries must be in strictly ascending symbol order with non-zero
    /// counts; anything else means the header was not written by us.
    pub fn from_entries<I>(entries: I) -> Result<Self, HeaderError>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut counts = [0u64; SYMBOL_COUNT];
        let mut distinct = 0;
        let mut total: u64 = 0;
        let mut previous: Option<u8> = None;

        for (symbol, count) in entries {
            if let Some(prev) = previous {
                if symbol <= prev {
                    return Err(HeaderError::UnorderedSymbol {
                        previous: prev,
                        symbol,
                    });
                }
            }
            if count == 0 {
                return Err(HeaderError::ZeroFrequency { symbol });
            }

            total = total
                .checked_add(count)
                .ok_or(HeaderError::FrequencyOverflow)?;
            counts[symbol as usize] = count;
            distinct += 1;
            previous = Some(symbol);
        }

        Ok(Self {
            counts,
            distinct,
            total,
        })
    }

    /// Count for `symbol`, or 0 if it never occurs.
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols present.
    pub fn len(&self) -> usize {
        self.distinct
    }

    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    /// Sum of all counts (the input length in symbols).
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Present symbols and their counts, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}
