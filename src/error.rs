use thiserror::Error;

/// Errors raised by the Huffman core.
///
/// Symbols are carried as their `Debug` rendering so the error stays `'static` regardless of the
/// symbol type it was raised for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HuffmanError {
    /// Tree construction was asked to work on a frequency table with no entries.
    #[error("cannot build a Huffman tree from an empty alphabet")]
    EmptyAlphabet,

    /// A symbol was offered to a frequency table with a count of zero.
    #[error("symbol {symbol} has a frequency of zero")]
    ZeroFrequency { symbol: String },

    /// Frequency counts, or a weight derived from them, do not fit in a `u64`.
    #[error("frequency weights overflow a 64-bit total")]
    WeightOverflow,

    /// The input sequence contains a symbol the code table was not trained on.
    #[error("symbol {symbol} at position {position} has no entry in the code table")]
    SymbolNotInTable { symbol: String, position: usize },

    /// A counted symbol has no code; raised where only counts are known, so there is no position.
    #[error("symbol {symbol} has no entry in the code table")]
    NoCodeForSymbol { symbol: String },

    /// The encoded stream ended in the middle of a code.
    #[error("encoded stream ends mid-code after {bits_consumed} bits ({symbols_decoded} symbols decoded)")]
    TruncatedStream { bits_consumed: usize, symbols_decoded: usize },

    /// A bit led off the tree, which only happens for a `1` against a single-leaf tree.
    #[error("bit {position} does not continue any code")]
    InvalidCode { position: usize },

    /// A textual bit-string held something other than `0` or `1`.
    #[error("invalid bit {found:?} at position {position}")]
    InvalidBit { position: usize, found: char },

    /// The compression ratio was requested over zero Huffman bits.
    #[error("compression ratio is undefined for an empty input")]
    UndefinedRatio,
}

pub type Result<T, E = HuffmanError> = std::result::Result<T, E>;
