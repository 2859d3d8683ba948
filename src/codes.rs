use std::collections::HashMap;

use crate::bits::BitString;
use crate::symbol::Symbol;
use crate::tree::{HuffNode, HuffmanTree};

/// Symbol to code mapping derived from a [`HuffmanTree`].
///
/// Every code is non-empty and no code is a prefix of another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S: Symbol> {
    codes: HashMap<S, BitString>,
}

/// Assigns each leaf the path that reaches it: `0` for a left edge, `1` for a right edge.
///
/// A tree that is a single leaf has no edges; its symbol gets the one-bit code `0`.
pub fn generate_codes<S: Symbol>(tree: &HuffmanTree<S>) -> CodeTable<S> {
    fn walk<S: Symbol>(node: &HuffNode<S>, path: &mut BitString, codes: &mut HashMap<S, BitString>) {
        match node {
            HuffNode::Leaf { symbol, .. } => {
                codes.insert(symbol.clone(), path.clone());
            }
            HuffNode::Internal { left, right, .. } => {
                path.push(false);
                walk(left, path, codes);
                path.pop();

                path.push(true);
                walk(right, path, codes);
                path.pop();
            }
        }
    }

    let mut codes = HashMap::with_capacity(tree.leaf_count());
    match tree.root() {
        HuffNode::Leaf { symbol, .. } => {
            codes.insert(symbol.clone(), BitString::from(vec![false]));
        }
        root => walk(root, &mut BitString::new(), &mut codes),
    }
    CodeTable { codes }
}

impl<S: Symbol> CodeTable<S> {
    pub fn get(&self, symbol: &S) -> Option<&BitString> {
        self.codes.get(symbol)
    }

    pub fn contains(&self, symbol: &S) -> bool {
        self.codes.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries sorted by symbol.
    pub fn sorted(&self) -> Vec<(&S, &BitString)> {
        let mut entries: Vec<_> = self.codes.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &BitString)> {
        self.codes.iter()
    }

    /// Longest code length, or 0 for an empty table.
    pub fn max_len(&self) -> usize {
        self.codes.values().map(BitString::len).max().unwrap_or(0)
    }

    /// Checks that no code is a prefix of another.
    ///
    /// Sorting the codes lexicographically puts any prefix directly before some code it
    /// prefixes, so comparing neighbours is enough.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&BitString> = self.codes.values().collect();
        codes.sort();
        codes.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }
}
