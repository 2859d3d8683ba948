use core::fmt;
use core::str::FromStr;

use crate::error::HuffmanError;

/// An ordered, growable sequence of bits.
///
/// Used both for single codes and for whole encoded streams. It renders as literal `0`/`1` text
/// and packs into bytes most significant bit first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    pub const fn new() -> Self {
        Self { bits: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Removes the last bit, if any.
    pub fn pop(&mut self) -> Option<bool> {
        self.bits.pop()
    }

    /// Appends every bit of `other`.
    pub fn extend_from(&mut self, other: &BitString) {
        self.bits.extend_from_slice(&other.bits);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// Whether `prefix` is a prefix of `self`.
    pub fn starts_with(&self, prefix: &BitString) -> bool {
        self.bits.starts_with(&prefix.bits)
    }

    /// Keeps the first `len` bits.
    pub fn truncate(&mut self, len: usize) {
        self.bits.truncate(len);
    }

    /// Packs the bits into bytes, first bit in the most significant position.
    ///
    /// The last byte is padded with zeros.
    pub fn to_packed(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.bits.len().div_ceil(8)];
        for (i, &bit) in self.bits.iter().enumerate() {
            if bit {
                bytes[i / 8] |= 1 << (7 - i % 8);
            }
        }
        bytes
    }

    /// Reads `bit_len` bits back out of packed bytes.
    ///
    /// Returns `None` when `bytes` is too short to hold `bit_len` bits.
    pub fn from_packed(bytes: &[u8], bit_len: usize) -> Option<Self> {
        if bytes.len() * 8 < bit_len {
            return None;
        }
        let bits = (0..bit_len).map(|i| bytes[i / 8] & (1 << (7 - i % 8)) != 0).collect();
        Some(Self { bits })
    }
}

impl From<Vec<bool>> for BitString {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Parses literal `0`/`1` text. Whitespace is not accepted.
impl FromStr for BitString {
    type Err = HuffmanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                found => Err(HuffmanError::InvalidBit { position, found }),
            })
            .collect()
    }
}
