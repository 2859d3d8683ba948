use crate::bits::BitString;
use crate::codes::{CodeTable, generate_codes};
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::symbol::{Symbol, describe};
use crate::tree::{HuffNode, HuffmanTree, build_tree};

/// Concatenates the code of every symbol in `symbols`, in order.
///
/// Fails on the first symbol the table has no code for.
pub fn encode<S: Symbol>(symbols: &[S], codes: &CodeTable<S>) -> Result<BitString> {
    let mut out = BitString::with_capacity(symbols.len() * codes.max_len());
    for (position, symbol) in symbols.iter().enumerate() {
        let code = codes.get(symbol).ok_or_else(|| HuffmanError::SymbolNotInTable {
            symbol: describe(symbol),
            position,
        })?;
        out.extend_from(code);
    }
    Ok(out)
}

/// Walks `tree` bit by bit, emitting a symbol and returning to the root at every leaf.
///
/// An empty stream decodes to an empty sequence. A single-leaf tree reads one `0` per symbol.
/// A stream that stops partway down the tree is an error; the partial code is neither completed
/// nor dropped.
pub fn decode<S: Symbol>(bits: &BitString, tree: &HuffmanTree<S>) -> Result<Vec<S>> {
    let root = tree.root();
    let mut out = Vec::new();

    if let HuffNode::Leaf { symbol, .. } = root {
        for (position, bit) in bits.iter().enumerate() {
            if bit {
                return Err(HuffmanError::InvalidCode { position });
            }
            out.push(symbol.clone());
        }
        return Ok(out);
    }

    let mut current = root;
    for (position, bit) in bits.iter().enumerate() {
        current = current.child(bit).ok_or(HuffmanError::InvalidCode { position })?;
        if let HuffNode::Leaf { symbol, .. } = current {
            out.push(symbol.clone());
            current = root;
        }
    }

    if !core::ptr::eq(current, root) {
        return Err(HuffmanError::TruncatedStream {
            bits_consumed: bits.len(),
            symbols_decoded: out.len(),
        });
    }
    Ok(out)
}

/// A tree together with the code table generated from it.
///
/// Both are read-only once built, so one codec can serve any number of encode and decode calls.
#[derive(Debug, Clone)]
pub struct HuffmanCodec<S: Symbol> {
    tree: HuffmanTree<S>,
    codes: CodeTable<S>,
}

impl<S: Symbol> HuffmanCodec<S> {
    pub fn new(tree: HuffmanTree<S>) -> Self {
        let codes = generate_codes(&tree);
        Self { tree, codes }
    }

    pub fn from_frequencies(frequencies: &FrequencyTable<S>) -> Result<Self> {
        Ok(Self::new(build_tree(frequencies)?))
    }

    pub fn from_symbols(symbols: &[S]) -> Result<Self> {
        Self::from_frequencies(&FrequencyTable::from_symbols(symbols.iter().cloned()))
    }

    pub fn encode(&self, symbols: &[S]) -> Result<BitString> {
        encode(symbols, &self.codes)
    }

    pub fn decode(&self, bits: &BitString) -> Result<Vec<S>> {
        decode(bits, &self.tree)
    }

    pub const fn tree(&self) -> &HuffmanTree<S> {
        &self.tree
    }

    pub const fn codes(&self) -> &CodeTable<S> {
        &self.codes
    }
}
