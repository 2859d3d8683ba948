use std::collections::BTreeMap;

use huffpack::container::EncodedBytes;
use huffpack::{BitString, CompressionMetrics, FrequencyTable, HuffmanCodec, HuffmanError, build_tree, decode, encode, generate_codes};
use proptest::prelude::*;

fn frequency_tables() -> impl Strategy<Value = FrequencyTable<u8>> {
    proptest::collection::btree_map(any::<u8>(), 1u64..1000, 1..48)
        .prop_map(|counts: BTreeMap<u8, u64>| FrequencyTable::from_counts(counts).expect("counts are positive"))
}

/// A non-empty sample and a message drawn only from the sample's alphabet.
fn sample_and_message() -> impl Strategy<Value = (Vec<u8>, Vec<u8>)> {
    proptest::collection::vec(any::<u8>(), 1..200).prop_flat_map(|sample| {
        let alphabet = sample.clone();
        let message = proptest::collection::vec(proptest::sample::select(alphabet), 0..300);
        (Just(sample), message)
    })
}

proptest! {
    #[test]
    fn codes_are_prefix_free(frequencies in frequency_tables()) {
        let tree = build_tree(&frequencies).expect("table is not empty");
        let codes = generate_codes(&tree);

        prop_assert_eq!(codes.len(), frequencies.len());
        prop_assert!(codes.is_prefix_free());
        for (a, code_a) in codes.iter() {
            prop_assert!(!code_a.is_empty(), "code for {} is empty", a);
            for (b, code_b) in codes.iter() {
                if a != b {
                    prop_assert!(!code_b.starts_with(code_a), "{} prefixes {}", a, b);
                }
            }
        }
    }

    #[test]
    fn decode_inverts_encode((sample, message) in sample_and_message()) {
        let codec = HuffmanCodec::from_symbols(&sample).expect("sample is not empty");
        let bits = codec.encode(&message).expect("message uses the sample alphabet");
        prop_assert_eq!(codec.decode(&bits).expect("stream is complete"), message);
    }

    #[test]
    fn tree_weight_and_path_length_match_the_table(frequencies in frequency_tables()) {
        let tree = build_tree(&frequencies).expect("table is not empty");
        let codes = generate_codes(&tree);
        prop_assert_eq!(tree.weight(), frequencies.total());

        let metrics = CompressionMetrics::from_frequencies(&frequencies, 8, &codes).expect("codes cover the table");
        prop_assert_eq!(Ok(metrics.huffman_bits), tree.encoded_length());
        prop_assert!(metrics.huffman_bits <= metrics.fixed_bits);
    }

    #[test]
    fn unknown_symbols_are_rejected(frequencies in frequency_tables(), stranger in any::<u8>()) {
        prop_assume!(frequencies.get(&stranger).is_none());
        let codes = generate_codes(&build_tree(&frequencies).expect("table is not empty"));
        let result = encode(&[stranger], &codes);
        let is_not_in_table = matches!(result, Err(HuffmanError::SymbolNotInTable { position: 0, .. }));
        prop_assert!(is_not_in_table);
    }

    #[test]
    fn cut_streams_are_truncated_or_aligned((sample, message) in sample_and_message(), cut in any::<prop::sample::Index>()) {
        prop_assume!(!message.is_empty());
        let codec = HuffmanCodec::from_symbols(&sample).expect("sample is not empty");
        let full = codec.encode(&message).expect("message uses the sample alphabet");

        let len = cut.index(full.len());
        let prefix: BitString = full.iter().take(len).collect();
        match decode(&prefix, codec.tree()) {
            Ok(symbols) => {
                // an aligned cut decodes to a prefix of the message
                prop_assert!(message.starts_with(&symbols));
                let used: usize = symbols.iter().map(|s| codec.codes().get(s).map_or(0, BitString::len)).sum();
                prop_assert_eq!(used, len);
            }
            Err(err) => {
                let is_truncated = matches!(err, HuffmanError::TruncatedStream { .. });
                prop_assert!(is_truncated, "unexpected error {:?}", err);
            }
        }
    }

    #[test]
    fn containers_round_trip(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        let encoded = EncodedBytes::encode(&data).expect("encoding own frequencies cannot fail");
        let bytes = encoded.to_container().expect("header serializes");
        let parsed = EncodedBytes::from_container(&bytes).expect("container parses");
        prop_assert_eq!(parsed.decode().expect("container decodes"), data);
    }
}

#[test]
fn one_symbol_alphabet_round_trips() {
    let frequencies = FrequencyTable::from_counts([(b'A', 3)]).unwrap();
    let tree = build_tree(&frequencies).unwrap();
    let codes = generate_codes(&tree);
    assert_eq!(codes.get(&b'A').unwrap().to_string(), "0");

    let bits = encode(b"AAA", &codes).unwrap();
    assert_eq!(bits.to_string(), "000");
    assert_eq!(decode(&bits, &tree).unwrap(), b"AAA".to_vec());
}

#[test]
fn empty_table_cannot_build_a_tree() {
    assert!(matches!(build_tree(&FrequencyTable::<u8>::new()), Err(HuffmanError::EmptyAlphabet)));
}
