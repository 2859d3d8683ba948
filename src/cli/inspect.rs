use std::collections::BTreeMap;

use anyhow::Result;
use huffpack::{CompressionMetrics, FrequencyTable, HuffmanCodec, fixed_width_for};

use crate::cli::{CliError, CodesArgs, StatsArgs, TreeArgs, display_byte, read_training_input};

fn codec_for(data: &[u8]) -> Result<(FrequencyTable<u8>, HuffmanCodec<u8>)> {
    let frequencies = FrequencyTable::from_symbols(data.iter().copied());
    let codec = HuffmanCodec::from_frequencies(&frequencies)?;
    Ok((frequencies, codec))
}

pub fn codes(args: CodesArgs) -> Result<()> {
    let data = read_training_input(&args.input)?;
    let (frequencies, codec) = codec_for(&data)?;

    if args.json {
        let table: BTreeMap<u8, String> = codec
            .codes()
            .iter()
            .map(|(&symbol, code)| (symbol, code.to_string()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!("{:<8} {:>10}  code", "symbol", "count");
    for (&symbol, code) in codec.codes().sorted() {
        let count = frequencies.get(&symbol).unwrap_or(0);
        println!("{:<8} {:>10}  {}", display_byte(symbol), count, code);
    }
    Ok(())
}

pub fn stats(args: StatsArgs) -> Result<()> {
    let data = read_training_input(&args.input)?;
    let (frequencies, codec) = codec_for(&data)?;

    let width = match args.width {
        Some(width @ 1..=64) => width,
        Some(width) => return Err(CliError::InvalidWidth(width).into()),
        None => fixed_width_for(frequencies.len()),
    };
    let metrics = CompressionMetrics::measure(&data, width, codec.codes())?;

    println!("symbols:          {}", metrics.symbol_count);
    println!("alphabet:         {}", frequencies.len());
    println!("fixed-width bits: {} ({} bits per symbol)", metrics.fixed_bits, width);
    println!("huffman bits:     {}", metrics.huffman_bits);
    if let Some(average) = metrics.bits_per_symbol() {
        println!("bits per symbol:  {:.3}", average);
    }
    println!("compression:      {:.2}", metrics.ratio()?);
    Ok(())
}

pub fn tree(args: TreeArgs) -> Result<()> {
    let data = read_training_input(&args.input)?;
    let (_, codec) = codec_for(&data)?;
    let tree = codec.tree();

    println!("Huffman Tree Structure:");
    print!("{}", tree);
    println!(
        "leaves: {}, height: {}, weighted path length: {}",
        tree.leaf_count(),
        tree.height(),
        tree.weighted_path_length()?
    );
    Ok(())
}
