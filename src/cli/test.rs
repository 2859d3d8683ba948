use anyhow::{Result, bail};
use huffpack::{CompressionMetrics, Compressor, FrequencyTable, HuffmanCodec, HuffmanCoding, fixed_width_for};

use crate::cli::{TestArgs, read_input};

pub fn test(args: TestArgs) -> Result<()> {
    let path = &args.input;
    let input = read_input(path)?;

    let mut compressor = HuffmanCoding;
    let result = compressor.test_roundtrip(&input)?;

    let original_size = result.get_original().len();
    let compressed_size = result.get_compressed().len();
    let bytes_saved = original_size as isize - compressed_size as isize;
    let percent_saved = if original_size == 0 {
        0.0
    } else {
        (bytes_saved as f64) / (original_size as f64) * 100.0
    };

    let passed_string = if result.is_successful() { "PASSED" } else { "FAILED" };
    eprintln!(
        "======== {} {} ========\n\toriginal: {} bytes\n\tcompressed: {} bytes\n\tdecompressed: {} bytes\n\tratio: {:.1}% (compressed/original)\n\tsaved: {:+} bytes ({:+.1}%)",
        passed_string,
        path.display(),
        original_size,
        compressed_size,
        result.get_decompressed().len(),
        result.size_ratio() * 100.0,
        bytes_saved,
        percent_saved,
    );

    let frequencies = FrequencyTable::from_symbols(input.iter().copied());
    if !frequencies.is_empty() {
        let codec = HuffmanCodec::from_frequencies(&frequencies)?;
        let width = fixed_width_for(frequencies.len());
        let metrics = CompressionMetrics::measure(&input, width, codec.codes())?;
        eprintln!(
            "\tfixed-width bits: {} ({} bits x {} symbols)\n\thuffman bits: {}\n\tbit ratio: {:.2}",
            metrics.fixed_bits,
            width,
            metrics.symbol_count,
            metrics.huffman_bits,
            metrics.ratio()?,
        );
    }

    if !result.is_successful() {
        bail!("roundtrip of {} did not reproduce the original", path.display());
    }
    Ok(())
}
