use crate::codes::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::symbol::{Symbol, describe};

/// Smallest fixed code width able to tell `alphabet_size` symbols apart, never below one bit.
pub const fn fixed_width_for(alphabet_size: usize) -> u32 {
    if alphabet_size <= 2 {
        1
    } else {
        usize::BITS - (alphabet_size - 1).leading_zeros()
    }
}

/// Fixed-width vs Huffman bit counts for one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionMetrics {
    pub symbol_count: u64,
    pub width: u32,
    pub fixed_bits: u64,
    pub huffman_bits: u64,
}

impl CompressionMetrics {
    /// Measures `symbols` under a `width`-bit fixed code and under `codes`.
    pub fn measure<S: Symbol>(symbols: &[S], width: u32, codes: &CodeTable<S>) -> Result<Self> {
        let mut huffman_bits = 0u64;
        for (position, symbol) in symbols.iter().enumerate() {
            let code = codes.get(symbol).ok_or_else(|| HuffmanError::SymbolNotInTable {
                symbol: describe(symbol),
                position,
            })?;
            huffman_bits = add_bits(huffman_bits, 1, code.len())?;
        }
        Self::with_counts(symbols.len() as u64, width, huffman_bits)
    }

    /// Same figures as [`measure`](Self::measure), computed from occurrence counts.
    ///
    /// A symbol with no code fails with [`HuffmanError::NoCodeForSymbol`].
    pub fn from_frequencies<S: Symbol>(frequencies: &FrequencyTable<S>, width: u32, codes: &CodeTable<S>) -> Result<Self> {
        let mut huffman_bits = 0u64;
        for (symbol, &count) in frequencies {
            let code = codes
                .get(symbol)
                .ok_or_else(|| HuffmanError::NoCodeForSymbol { symbol: describe(symbol) })?;
            huffman_bits = add_bits(huffman_bits, count, code.len())?;
        }
        Self::with_counts(frequencies.total(), width, huffman_bits)
    }

    fn with_counts(symbol_count: u64, width: u32, huffman_bits: u64) -> Result<Self> {
        let fixed_bits = symbol_count
            .checked_mul(u64::from(width))
            .ok_or(HuffmanError::WeightOverflow)?;
        Ok(Self {
            symbol_count,
            width,
            fixed_bits,
            huffman_bits,
        })
    }

    /// `fixed_bits / huffman_bits`; undefined when there are no Huffman bits (empty input).
    pub fn ratio(&self) -> Result<f64> {
        if self.huffman_bits == 0 {
            return Err(HuffmanError::UndefinedRatio);
        }
        Ok(self.fixed_bits as f64 / self.huffman_bits as f64)
    }

    /// Average Huffman code length per symbol, or `None` for an empty input.
    pub fn bits_per_symbol(&self) -> Option<f64> {
        (self.symbol_count != 0).then(|| self.huffman_bits as f64 / self.symbol_count as f64)
    }
}

/// `total + count * code_len`, or `WeightOverflow`.
fn add_bits(total: u64, count: u64, code_len: usize) -> Result<u64> {
    count
        .checked_mul(code_len as u64)
        .and_then(|bits| total.checked_add(bits))
        .ok_or(HuffmanError::WeightOverflow)
}
