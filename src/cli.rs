//! cli component of huffpack.
//!
//! `$exename` stands for the executable name. `<description>` denotes a required argument,
//! `[description]` an optional one.
//!
//! # Compression
//!
//! > `$exename enc <input> <output> [--text]`
//!
//! counts the bytes of the input, builds the huffman tree for exactly that input and writes the
//! packed container, which carries the frequency table so the decoder needs nothing else.
//! with `--text` the encoded bits are written as literal `0`/`1` characters instead, and the
//! frequency table goes to `{output stem}.freq.json` next to the output.
//!
//! # Decompression
//!
//! > `$exename dec <input> <output> [--table <path to freq.json>]`
//!
//! without `--table` the input must be a packed container. with it, the input is read as
//! `0`/`1` text and decoded with the given table.
//!
//! # Testing
//!
//! > `$exename test <input>`
//!
//! compresses the input, decompresses the result and compares it with the original. prints the
//! sizes and the fixed-width vs huffman bit counts.
//!
//! # Inspection
//!
//! > `$exename codes <input> [--json]`
//! > `$exename stats <input> [--width <bits>]`
//! > `$exename tree <input>`
//!
//! print the code table, the compression figures, or the tree outline for the input's byte
//! frequencies. `stats` compares against a fixed code of `--width` bits, defaulting to the
//! smallest width that can distinguish the input's alphabet.
//!
//! # Sample data
//!
//! > `$exename generate <output> [--seed <n>] [--from-file <distribution.json>]`
//!
//! writes shuffled text in which every symbol appears exactly as often as the distribution says.
//! the default distribution is `A..J` with counts `45 13 12 16 9 5 4 3 2 1`.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use thiserror::Error;

pub mod decode;
pub mod encode;
pub mod generate;
pub mod inspect;
pub mod test;

/// Errors in command arguments or their inputs, as opposed to failures of the codec itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{} is empty; there is nothing to build a code from", .path.display())]
    EmptyInput { path: PathBuf },

    #[error("invalid fixed width {0}: must be between 1 and 64 bits")]
    InvalidWidth(u32),
}

/// CLI arguments for huffpack
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Supported commands for huffpack
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode (compress) a file
    #[command(alias = "enc")]
    Encode(EncodeArgs),

    /// Decode (decompress) a file
    #[command(alias = "dec")]
    Decode(DecodeArgs),

    /// Test compression/decompression roundtrip
    Test(TestArgs),

    /// Print the code table built from a file
    Codes(CodesArgs),

    /// Compare fixed-width and huffman bit counts for a file
    Stats(StatsArgs),

    /// Print the huffman tree built from a file
    Tree(TreeArgs),

    /// Write sample data with a known symbol distribution
    #[command(alias = "gen")]
    Generate(GenerateArgs),
}

/// Arguments specific to the encode command
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Path to the input file
    pub input: PathBuf,

    /// Path for the output file
    pub output: PathBuf,

    /// Write the bits as 0/1 text, with the frequency table in a sidecar JSON file
    #[arg(long)]
    pub text: bool,
}

/// Arguments specific to the decode command
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Path to the input file
    pub input: PathBuf,

    /// Path for the output file
    pub output: PathBuf,

    /// Frequency table JSON; treats the input as 0/1 text
    #[arg(long)]
    pub table: Option<PathBuf>,
}

/// Arguments specific to the test command
#[derive(Args, Debug)]
pub struct TestArgs {
    /// Path to the file to roundtrip
    pub input: PathBuf,
}

#[derive(Args, Debug)]
pub struct CodesArgs {
    /// Path to the input file
    pub input: PathBuf,

    /// Print the table as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Path to the input file
    pub input: PathBuf,

    /// Bits per symbol of the fixed-width baseline
    #[arg(long)]
    pub width: Option<u32>,
}

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Path to the input file
    pub input: PathBuf,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path for the output file
    pub output: PathBuf,

    /// Shuffle seed
    #[arg(long, default_value_t = 0xdeadcafe)]
    pub seed: u64,

    /// Load the symbol distribution from a JSON file
    #[arg(long)]
    pub from_file: Option<PathBuf>,
}

/// Reads a whole input file, naming the path on failure.
pub fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Reads an input file that must hold at least one byte to train a code on.
pub fn read_training_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    let data = read_input(path)?;
    if data.is_empty() {
        return Err(CliError::EmptyInput { path: path.to_path_buf() }.into());
    }
    Ok(data)
}

pub fn write_output(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
}

/// Printable form of a byte symbol: the character itself when it is visible ASCII, escaped
/// otherwise.
pub fn display_byte(byte: u8) -> String {
    match byte {
        b' ' => "' '".to_string(),
        b if b.is_ascii_graphic() => format!("'{}'", b as char),
        b => format!("{:?}", b as char).trim_matches('\'').to_string(),
    }
}
