//! On-disk forms of an encoded byte stream.
//!
//! The packed container stores everything the decoder needs in one file:
//!
//! ```text
//! "HUFP" | version: u8 | header_len: u32 LE | header (JSON) | packed bits
//! ```
//!
//! The header records the original length, the exact bit length and the frequency table. The
//! decoder rebuilds the tree from the frequencies; construction is deterministic, so the codes
//! come out identical to the ones used for encoding.
//!
//! The text form writes the bits as literal `0`/`1` characters and keeps the frequency table in
//! a `<stem>.freq.json` file next to it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bits::BitString;
use crate::codec::HuffmanCodec;
use crate::error::HuffmanError;
use crate::frequency::FrequencyTable;

pub const MAGIC: &[u8; 4] = b"HUFP";
pub const VERSION: u8 = 1;

const PREAMBLE_LEN: usize = MAGIC.len() + 1 + 4;

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("not a huffpack container (bad magic)")]
    BadMagic,

    #[error("unsupported container version {0}")]
    UnsupportedVersion(u8),

    #[error("container ends early: {0}")]
    UnexpectedEof(&'static str),

    #[error("container header is malformed: {0}")]
    Header(#[from] serde_json::Error),

    #[error("decoded {got} bytes but the header promises {expected}")]
    LengthMismatch { expected: u64, got: u64 },

    #[error("stored bits do not match the stored frequency table: {0}")]
    Codec(#[from] HuffmanError),

    #[error("container header is {0} bytes, past the 4 GiB limit")]
    HeaderTooLarge(usize),

    #[error("{} has no file name to place a frequency table next to", .0.display())]
    NoFileName(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

type Result<T> = std::result::Result<T, ContainerError>;

/// Metadata stored ahead of the packed bits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerHeader {
    pub original_length: u64,
    pub bit_length: u64,
    pub frequencies: FrequencyTable<u8>,
}

/// An encoded byte stream plus the table it was encoded with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBytes {
    pub frequencies: FrequencyTable<u8>,
    pub bits: BitString,
    pub original_length: u64,
}

impl EncodedBytes {
    /// Counts `data`, builds its code and encodes it.
    ///
    /// Empty input yields an empty table and no bits.
    pub fn encode(data: &[u8]) -> Result<Self> {
        let frequencies = FrequencyTable::from_symbols(data.iter().copied());
        let bits = if frequencies.is_empty() {
            BitString::new()
        } else {
            HuffmanCodec::from_frequencies(&frequencies)?.encode(data)?
        };
        Ok(Self {
            frequencies,
            bits,
            original_length: data.len() as u64,
        })
    }

    /// Rebuilds the tree from the stored table and decodes the bits.
    pub fn decode(&self) -> Result<Vec<u8>> {
        let decoded = if self.frequencies.is_empty() {
            if !self.bits.is_empty() {
                return Err(HuffmanError::EmptyAlphabet.into());
            }
            Vec::new()
        } else {
            HuffmanCodec::from_frequencies(&self.frequencies)?.decode(&self.bits)?
        };

        if decoded.len() as u64 != self.original_length {
            return Err(ContainerError::LengthMismatch {
                expected: self.original_length,
                got: decoded.len() as u64,
            });
        }
        Ok(decoded)
    }

    /// Serializes into the packed container layout.
    pub fn to_container(&self) -> Result<Vec<u8>> {
        let header = ContainerHeader {
            original_length: self.original_length,
            bit_length: self.bits.len() as u64,
            frequencies: self.frequencies.clone(),
        };
        let header = serde_json::to_vec(&header)?;
        let header_len = u32::try_from(header.len()).map_err(|_| ContainerError::HeaderTooLarge(header.len()))?;
        let payload = self.bits.to_packed();

        let mut out = Vec::with_capacity(PREAMBLE_LEN + header.len() + payload.len());
        out.extend_from_slice(MAGIC);
        out.push(VERSION);
        out.extend_from_slice(&header_len.to_le_bytes());
        out.extend_from_slice(&header);
        out.extend_from_slice(&payload);
        Ok(out)
    }

    /// Parses the packed container layout. Does not decode the bits.
    pub fn from_container(data: &[u8]) -> Result<Self> {
        if data.len() < MAGIC.len() || &data[..MAGIC.len()] != MAGIC {
            return Err(ContainerError::BadMagic);
        }
        if data.len() < PREAMBLE_LEN {
            return Err(ContainerError::UnexpectedEof("preamble"));
        }
        let version = data[MAGIC.len()];
        if version != VERSION {
            return Err(ContainerError::UnsupportedVersion(version));
        }

        let len_at = MAGIC.len() + 1;
        let header_len = u32::from_le_bytes([data[len_at], data[len_at + 1], data[len_at + 2], data[len_at + 3]]) as usize;
        let rest = &data[PREAMBLE_LEN..];
        if rest.len() < header_len {
            return Err(ContainerError::UnexpectedEof("header"));
        }
        let (header, payload) = rest.split_at(header_len);
        let header: ContainerHeader = serde_json::from_slice(header)?;

        let bit_len = usize::try_from(header.bit_length).map_err(|_| ContainerError::UnexpectedEof("payload"))?;
        let bits = BitString::from_packed(payload, bit_len).ok_or(ContainerError::UnexpectedEof("payload"))?;

        Ok(Self {
            frequencies: header.frequencies,
            bits,
            original_length: header.original_length,
        })
    }

    /// Builds the value from the text form and its frequency table.
    pub fn from_text(text: &str, frequencies: FrequencyTable<u8>) -> Result<Self> {
        let bits: BitString = text.trim_end().parse()?;
        let original_length = frequencies.total();
        Ok(Self {
            frequencies,
            bits,
            original_length,
        })
    }
}

/// Path of the frequency sidecar for `base_path`: same directory, `<stem>.freq.json`.
pub fn sidecar_path(base_path: &Path) -> Result<PathBuf> {
    let stem = base_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ContainerError::NoFileName(base_path.to_path_buf()))?;
    Ok(base_path.with_file_name(format!("{}.freq.json", stem)))
}

/// Writes `table` as pretty JSON next to `base_path` and returns where it went.
pub fn save_frequency_table(table: &FrequencyTable<u8>, base_path: &Path) -> Result<PathBuf> {
    let path = sidecar_path(base_path)?;
    let json = serde_json::to_string_pretty(table)?;
    fs::write(&path, json)?;
    Ok(path)
}

pub fn load_frequency_table(path: &Path) -> Result<FrequencyTable<u8>> {
    let json = fs::read(path)?;
    Ok(serde_json::from_slice(&json)?)
}
