use core::fmt::{self, Display};

use anyhow::Context;

use crate::compressor::{Compressor, Result};
use crate::container::EncodedBytes;

/// Byte compressor over the packed container format.
///
/// Each call counts its own input, so no state carries over between calls.
#[derive(Clone, Copy, Debug, Default)]
pub struct HuffmanCoding;

impl Compressor for HuffmanCoding {
    fn compress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        self.huffman_encode(data)
    }

    fn decompress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        self.huffman_decode(data)
    }

    fn compressor_name(&self) -> String {
        self.to_string()
    }
}

impl Display for HuffmanCoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Huffman Coding")
    }
}

impl HuffmanCoding {
    pub fn huffman_encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        if_tracing! {
            tracing::debug!(target: "huffman", input_len = data.len(), "huffman encode start");
        }

        let encoded = EncodedBytes::encode(data).context("huffman encoder error")?;
        let out = encoded.to_container().context("huffman encoder error")?;

        if_tracing! {
            tracing::info!(
                target: "huffman",
                input_len = data.len(),
                alphabet = encoded.frequencies.len(),
                bit_len = encoded.bits.len(),
                output_len = out.len(),
                "huffman encode complete"
            );
        }
        Ok(out)
    }

    pub fn huffman_decode(&self, data: &[u8]) -> Result<Vec<u8>> {
        if_tracing! {
            tracing::debug!(target: "huffman", input_len = data.len(), "huffman decode start");
        }

        let decoded = EncodedBytes::from_container(data)
            .and_then(|encoded| encoded.decode())
            .inspect_err(|_err| {
                if_tracing! {
                    tracing::error!(target: "huffman", error = %_err, "huffman decode failed");
                }
            })
            .context("huffman decoder error")?;

        if_tracing! {
            tracing::info!(target: "huffman", input_len = data.len(), output_len = decoded.len(), "huffman decode complete");
        }
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_tests() {
        crate::tests::roundtrip_test(HuffmanCoding);
    }

    #[test]
    fn rejects_garbage() {
        let err = HuffmanCoding.decompress_bytes(b"definitely not huffman").unwrap_err();
        assert!(err.to_string().contains("huffman decoder error"));
    }

    #[test]
    fn skewed_text_shrinks() {
        let data = "a".repeat(4000) + &"b".repeat(100) + "cdefg";
        let compressed = HuffmanCoding.compress_bytes(data.as_bytes()).unwrap();
        assert!(compressed.len() < data.len() / 4);
    }
}
