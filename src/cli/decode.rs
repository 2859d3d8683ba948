use anyhow::{Context, Result};
use huffpack::container::{EncodedBytes, load_frequency_table};
use huffpack::if_tracing;

use crate::cli::{DecodeArgs, read_input, write_output};

pub fn decode(args: DecodeArgs) -> Result<()> {
    let input_path = &args.input;
    let output_path = &args.output;

    let input_data = read_input(input_path)?;
    let encoded = match &args.table {
        Some(table_path) => {
            let table = load_frequency_table(table_path).with_context(|| format!("failed to load {}", table_path.display()))?;
            let text = String::from_utf8(input_data).with_context(|| format!("{} is not 0/1 text", input_path.display()))?;
            EncodedBytes::from_text(&text, table)?
        }
        None => EncodedBytes::from_container(&input_data)?,
    };

    let decompressed_data = encoded
        .decode()
        .with_context(|| format!("failed to decode {}", input_path.display()))?;

    if_tracing! {
        tracing::info!(
            event = "decode_complete",
            input = %input_path.display(),
            output = %output_path.display(),
            bit_len = encoded.bits.len(),
            decompressed_len = decompressed_data.len(),
            "decode finished"
        );
    }
    write_output(output_path, &decompressed_data)
}
