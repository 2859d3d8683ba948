use core::cmp::{Ordering, Reverse};
use core::fmt;
use std::collections::BinaryHeap;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;

/// A node of a Huffman tree.
///
/// Internal nodes own both children and carry the sum of their weights. The tree is always a
/// full binary tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode<S> {
    Leaf {
        symbol: S,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode<S>>,
        right: Box<HuffNode<S>>,
    },
}

impl<S> HuffNode<S> {
    pub const fn leaf(symbol: S, weight: u64) -> Self {
        HuffNode::Leaf { symbol, weight }
    }

    pub const fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub const fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    /// Joins two subtrees; `left` is the one extracted first from the queue.
    ///
    /// Fails with [`HuffmanError::WeightOverflow`] if the combined weight does not fit in a `u64`.
    pub fn merge(left: Self, right: Self) -> Result<Self> {
        let weight = left.weight().checked_add(right.weight()).ok_or(HuffmanError::WeightOverflow)?;
        Ok(HuffNode::Internal {
            weight,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Child reached by following `bit` (`false` = left, `true` = right).
    ///
    /// A leaf has no children.
    pub fn child(&self, bit: bool) -> Option<&Self> {
        match self {
            HuffNode::Leaf { .. } => None,
            HuffNode::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }
}

/// An immutable Huffman tree, owned through its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<S> {
    root: HuffNode<S>,
}

/// Builds an optimal prefix-code tree for `frequencies`.
///
/// Nodes are held in a min-priority queue keyed by weight. Ties are broken first-in first-out:
/// leaves are queued in ascending symbol order, every merged node is queued after everything
/// already present, and among equal weights the earliest queued node comes out first. The first
/// node extracted in each round becomes the left child. The rule is fixed, so the same table
/// always produces the same tree and the same codes.
///
/// A one-symbol table produces a tree whose root is that symbol's leaf.
pub fn build_tree<S: Symbol>(frequencies: &FrequencyTable<S>) -> Result<HuffmanTree<S>> {
    let mut queue = BinaryHeap::with_capacity(frequencies.len());
    let mut sequence = 0u64;

    for (symbol, &weight) in frequencies {
        queue.push(Reverse(Queued::new(HuffNode::leaf(symbol.clone(), weight), sequence)));
        sequence += 1;
    }

    while queue.len() > 1 {
        let (Some(Reverse(first)), Some(Reverse(second))) = (queue.pop(), queue.pop()) else {
            unreachable!("queue holds at least two nodes");
        };
        queue.push(Reverse(Queued::new(HuffNode::merge(first.node, second.node)?, sequence)));
        sequence += 1;
    }

    match queue.pop() {
        Some(Reverse(last)) => Ok(HuffmanTree { root: last.node }),
        None => Err(HuffmanError::EmptyAlphabet),
    }
}

/// Queue entry ordered by `(weight, sequence)` only.
struct Queued<S> {
    weight: u64,
    sequence: u64,
    node: HuffNode<S>,
}

impl<S> Queued<S> {
    const fn new(node: HuffNode<S>, sequence: u64) -> Self {
        Self {
            weight: node.weight(),
            sequence,
            node,
        }
    }
}

impl<S> PartialEq for Queued<S> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.sequence == other.sequence
    }
}

impl<S> Eq for Queued<S> {}

impl<S> PartialOrd for Queued<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for Queued<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl<S: Symbol> HuffmanTree<S> {
    /// Counts `symbols` and builds the tree in one go.
    pub fn from_symbols<I: IntoIterator<Item = S>>(symbols: I) -> Result<Self> {
        build_tree(&FrequencyTable::from_symbols(symbols))
    }

    pub const fn root(&self) -> &HuffNode<S> {
        &self.root
    }

    /// Total weight, equal to the sum of the frequencies the tree was built from.
    pub const fn weight(&self) -> u64 {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        fn count<S>(node: &HuffNode<S>) -> usize {
            match node {
                HuffNode::Leaf { .. } => 1,
                HuffNode::Internal { left, right, .. } => count(left) + count(right),
            }
        }
        count(&self.root)
    }

    /// Number of edges on the longest root-to-leaf path. A single-leaf tree has height 0.
    pub fn height(&self) -> usize {
        fn height<S>(node: &HuffNode<S>) -> usize {
            match node {
                HuffNode::Leaf { .. } => 0,
                HuffNode::Internal { left, right, .. } => 1 + height(left).max(height(right)),
            }
        }
        height(&self.root)
    }

    /// Sum over leaves of weight times depth. A single-leaf tree has depth 0 and length 0.
    pub fn weighted_path_length(&self) -> Result<u64> {
        fn walk<S>(node: &HuffNode<S>, depth: u64) -> Option<u64> {
            match node {
                HuffNode::Leaf { weight, .. } => weight.checked_mul(depth),
                HuffNode::Internal { left, right, .. } => walk(left, depth + 1)?.checked_add(walk(right, depth + 1)?),
            }
        }
        walk(&self.root, 0).ok_or(HuffmanError::WeightOverflow)
    }

    /// Bits the tree's codes spend on the sequence it was built from.
    ///
    /// Equal to the weighted path length, except that a single-leaf tree spends one bit per
    /// occurrence on its `0` code.
    pub fn encoded_length(&self) -> Result<u64> {
        match &self.root {
            HuffNode::Leaf { weight, .. } => Ok(*weight),
            HuffNode::Internal { .. } => self.weighted_path_length(),
        }
    }

    /// Leaves from left to right as `(symbol, weight)`.
    pub fn leaves(&self) -> Vec<(&S, u64)> {
        fn collect<'a, S>(node: &'a HuffNode<S>, out: &mut Vec<(&'a S, u64)>) {
            match node {
                HuffNode::Leaf { symbol, weight } => out.push((symbol, *weight)),
                HuffNode::Internal { left, right, .. } => {
                    collect(left, out);
                    collect(right, out);
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.root, &mut out);
        out
    }

    /// The frequency table the tree encodes, recovered from its leaves.
    pub fn frequencies(&self) -> Result<FrequencyTable<S>> {
        FrequencyTable::from_counts(self.leaves().into_iter().map(|(symbol, weight)| (symbol.clone(), weight)))
    }
}

/// Indented outline of the tree, one node per line.
impl<S: Symbol> fmt::Display for HuffmanTree<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node<S: Symbol>(f: &mut fmt::Formatter<'_>, node: &HuffNode<S>, depth: usize, label: &str) -> fmt::Result {
            let indent = "  ".repeat(depth);
            match node {
                HuffNode::Leaf { symbol, weight } => writeln!(f, "{}{}-> Leaf: {:?} [weight: {}]", indent, label, symbol, weight),
                HuffNode::Internal { weight, left, right } => {
                    writeln!(f, "{}{}-> Internal [weight: {}]", indent, label, weight)?;
                    write_node(f, left, depth + 1, "L")?;
                    write_node(f, right, depth + 1, "R")
                }
            }
        }
        write_node(f, &self.root, 0, "root")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(counts: &[(char, u64)]) -> FrequencyTable<char> {
        FrequencyTable::from_counts(counts.iter().copied()).unwrap()
    }

    /// Smallest weighted path length over every full binary tree with these leaf weights.
    ///
    /// Every full binary tree arises from some sequence of pairwise merges, and the weighted
    /// path length is the sum of the merged weights, so trying every pair at every step covers
    /// all trees.
    fn brute_force_minimum(weights: &[u64]) -> u64 {
        if weights.len() <= 1 {
            return 0;
        }
        let mut best = u64::MAX;
        for i in 0..weights.len() {
            for j in (i + 1)..weights.len() {
                let merged = weights[i] + weights[j];
                let mut rest: Vec<u64> = weights
                    .iter()
                    .enumerate()
                    .filter(|&(k, _)| k != i && k != j)
                    .map(|(_, &w)| w)
                    .collect();
                rest.push(merged);
                best = best.min(merged + brute_force_minimum(&rest));
            }
        }
        best
    }

    #[test]
    fn empty_alphabet_is_an_error() {
        let empty: FrequencyTable<u8> = FrequencyTable::new();
        assert_eq!(build_tree(&empty), Err(HuffmanError::EmptyAlphabet));
    }

    #[test]
    fn single_symbol_root_is_a_leaf() {
        let tree = build_tree(&table(&[('x', 7)])).unwrap();
        assert_eq!(tree.root(), &HuffNode::leaf('x', 7));
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.weighted_path_length(), Ok(0));
        assert_eq!(tree.encoded_length(), Ok(7));
    }

    #[test]
    fn internal_weights_are_sums_of_children() {
        fn check(node: &HuffNode<char>) {
            if let HuffNode::Internal { weight, left, right } = node {
                assert_eq!(*weight, left.weight() + right.weight());
                check(left);
                check(right);
            }
        }
        let tree = build_tree(&table(&[('a', 5), ('b', 9), ('c', 12), ('d', 13), ('e', 16), ('f', 45)])).unwrap();
        check(tree.root());
        assert_eq!(tree.weight(), 100);
        assert_eq!(tree.leaf_count(), 6);
    }

    #[test]
    fn ties_are_broken_first_in_first_out() {
        // a, b, c all weigh 1: a and b merge first, then c joins as the left child because it
        // was queued before the merged node.
        let tree = build_tree(&table(&[('a', 1), ('b', 1), ('c', 1)])).unwrap();
        let leaves: Vec<char> = tree.leaves().into_iter().map(|(&s, _)| s).collect();
        assert_eq!(leaves, vec!['c', 'a', 'b']);
    }

    #[test]
    fn construction_is_deterministic() {
        let counts = [('q', 3), ('r', 3), ('s', 3), ('t', 3), ('u', 6)];
        assert_eq!(build_tree(&table(&counts)).unwrap(), build_tree(&table(&counts)).unwrap());
    }

    #[test]
    fn weighted_path_length_is_minimal_on_small_alphabets() {
        let cases: &[&[u64]] = &[
            &[1, 1, 1],
            &[1, 2, 3],
            &[5, 1, 1],
            &[1, 1, 2, 4],
            &[3, 3, 3, 3],
            &[7, 1, 2, 9],
            &[1, 1, 1, 1, 1],
            &[2, 3, 5, 8, 13],
            &[10, 1, 4, 4, 6],
            &[45, 13, 12, 16, 9],
        ];
        for weights in cases {
            let frequencies = FrequencyTable::from_counts(weights.iter().enumerate().map(|(i, &w)| (i, w))).unwrap();
            let tree = build_tree(&frequencies).unwrap();
            assert_eq!(
                tree.weighted_path_length(),
                Ok(brute_force_minimum(weights)),
                "weights {:?} did not produce a minimal tree",
                weights
            );
        }
    }

    #[test]
    fn frequencies_are_recovered_from_leaves() {
        let original = table(&[('a', 4), ('b', 1), ('c', 2)]);
        assert_eq!(build_tree(&original).unwrap().frequencies(), Ok(original));
    }

    #[test]
    fn merge_rejects_overflowing_weights() {
        let heavy = HuffNode::leaf('a', u64::MAX);
        let light = HuffNode::leaf('b', 1);
        assert_eq!(HuffNode::merge(heavy, light), Err(HuffmanError::WeightOverflow));
    }

    #[test]
    fn full_range_total_builds() {
        let tree = build_tree(&table(&[('a', u64::MAX - 2), ('b', 1), ('c', 1)])).unwrap();
        assert_eq!(tree.weight(), u64::MAX);
        // 'a' sits at depth 1, so its weight alone fits but the path length does not
        assert_eq!(tree.encoded_length(), Err(HuffmanError::WeightOverflow));
    }

    #[test]
    fn outline_lists_every_node() {
        let tree = build_tree(&table(&[('a', 1), ('b', 2)])).unwrap();
        let outline = tree.to_string();
        assert_eq!(
            outline,
            "root-> Internal [weight: 3]\n  L-> Leaf: 'a' [weight: 1]\n  R-> Leaf: 'b' [weight: 2]\n"
        );
    }
}
