//! # huffpack
//!
//! Static Huffman coding over any ordered, hashable symbol type.
//!
//! The pipeline is frequencies -> tree -> code table -> encoded bits, and back to symbols by
//! walking the same tree:
//!
//! ```rust
//! use huffpack::{FrequencyTable, build_tree, decode, encode, generate_codes};
//!
//! let text: Vec<char> = "abracadabra".chars().collect();
//! let frequencies = FrequencyTable::from_symbols(text.iter().copied());
//! let tree = build_tree(&frequencies)?;
//! let codes = generate_codes(&tree);
//!
//! let bits = encode(&text, &codes)?;
//! assert_eq!(decode(&bits, &tree)?, text);
//! # Ok::<(), huffpack::HuffmanError>(())
//! ```

/// Runs the body only when the `tracing` feature is enabled.
///
/// Use in statement position; the body is wrapped in its own block.
#[macro_export]
macro_rules! if_tracing {
    {$($body:tt)*} => {
        #[cfg(feature = "tracing")]
        {
            $($body)*
        };
    };
}

pub mod bits;
pub mod codec;
pub mod codes;
pub mod compressor;
pub mod container;
pub mod error;
pub mod frequency;
pub mod generate;
pub mod huffman;
pub mod metrics;
pub mod symbol;
pub mod tree;


pub use bits::BitString;
pub use codec::{HuffmanCodec, decode, encode};
pub use codes::{CodeTable, generate_codes};
pub use compressor::{Compressor, RoundTripTestResult};
pub use error::HuffmanError;
pub use frequency::FrequencyTable;
pub use huffman::HuffmanCoding;
pub use metrics::{CompressionMetrics, fixed_width_for};
pub use symbol::Symbol;
pub use tree::{HuffNode, HuffmanTree, build_tree};
