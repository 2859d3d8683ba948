//! Sample data with a known symbol distribution.
//!
//! Each symbol appears exactly as many times as its count says, in shuffled order, so the
//! frequency table of the output is the distribution itself.

use serde::{Deserialize, Serialize};
use voxell_rng::rng::XorShift128;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleEntry {
    pub symbol: char,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleDistribution {
    pub entries: Vec<SampleEntry>,
}

impl Default for SampleDistribution {
    /// Ten letters with skewed counts summing to 110.
    fn default() -> Self {
        let entries = [
            ('A', 45),
            ('B', 13),
            ('C', 12),
            ('D', 16),
            ('E', 9),
            ('F', 5),
            ('G', 4),
            ('H', 3),
            ('I', 2),
            ('J', 1),
        ]
        .into_iter()
        .map(|(symbol, count)| SampleEntry { symbol, count })
        .collect();
        Self { entries }
    }
}

impl SampleDistribution {
    /// Length of the generated data; fails like [`frequencies`](Self::frequencies).
    pub fn total(&self) -> Result<u64> {
        Ok(self.frequencies()?.total())
    }

    /// The distribution as a frequency table; rejects zero counts and totals past `u64::MAX`.
    pub fn frequencies(&self) -> Result<FrequencyTable<char>> {
        FrequencyTable::from_counts(self.entries.iter().map(|e| (e.symbol, e.count)))
    }
}

/// Seeded xorshift stream. Each draw reseeds from the value it returns.
struct SampleRng {
    rng: XorShift128,
}

impl SampleRng {
    fn new(seed: u64) -> Self {
        Self {
            rng: XorShift128::new(seed),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let value = self.rng.peek_next_u64();
        self.rng = XorShift128::new(value);
        value
    }

    /// Uniform-enough index in `0..=upper` for shuffling test data.
    fn index_up_to(&mut self, upper: usize) -> usize {
        (self.next_u64() % (upper as u64 + 1)) as usize
    }
}

/// Repeats each symbol `count` times and shuffles the result.
///
/// The same distribution and seed always give the same output.
pub fn generate(distribution: &SampleDistribution, seed: u64) -> Result<Vec<char>> {
    // validates counts before allocating
    let frequencies = distribution.frequencies()?;
    if frequencies.is_empty() {
        return Err(HuffmanError::EmptyAlphabet);
    }

    let mut data: Vec<char> = distribution
        .entries
        .iter()
        .flat_map(|e| std::iter::repeat_n(e.symbol, e.count as usize))
        .collect();

    let mut rng = SampleRng::new(seed);
    for i in (1..data.len()).rev() {
        let j = rng.index_up_to(i);
        data.swap(i, j);
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_the_distribution() {
        let distribution = SampleDistribution::default();
        let data = generate(&distribution, 7).unwrap();
        assert_eq!(Ok(data.len() as u64), distribution.total());
        assert_eq!(FrequencyTable::from_symbols(data.iter().copied()), distribution.frequencies().unwrap());
    }

    #[test]
    fn same_seed_same_output() {
        let distribution = SampleDistribution::default();
        assert_eq!(generate(&distribution, 42).unwrap(), generate(&distribution, 42).unwrap());
    }

    #[test]
    fn output_is_shuffled() {
        let distribution = SampleDistribution::default();
        let data = generate(&distribution, 0xdeadcafe).unwrap();
        let sorted_run: Vec<char> = distribution
            .entries
            .iter()
            .flat_map(|e| std::iter::repeat_n(e.symbol, e.count as usize))
            .collect();
        assert_ne!(data, sorted_run);
    }

    #[test]
    fn empty_distribution_is_rejected() {
        let distribution = SampleDistribution { entries: vec![] };
        assert_eq!(generate(&distribution, 1), Err(HuffmanError::EmptyAlphabet));
    }

    #[test]
    fn zero_counts_are_rejected() {
        let distribution = SampleDistribution {
            entries: vec![SampleEntry { symbol: 'x', count: 0 }],
        };
        assert!(matches!(generate(&distribution, 1), Err(HuffmanError::ZeroFrequency { .. })));
    }

    #[test]
    fn distribution_loads_from_json() {
        let json = r#"{ "entries": [ { "symbol": "x", "count": 3 }, { "symbol": "y", "count": 1 } ] }"#;
        let distribution: SampleDistribution = serde_json::from_str(json).unwrap();
        assert_eq!(distribution.total(), Ok(4));
    }
}
