use anyhow::{Context, Result};
use huffpack::container::{EncodedBytes, save_frequency_table};
use huffpack::if_tracing;

use crate::cli::{EncodeArgs, read_input, write_output};

pub fn encode(args: EncodeArgs) -> Result<()> {
    let input_path = &args.input;
    let output_path = &args.output;

    let input_data = read_input(input_path)?;
    let encoded = EncodedBytes::encode(&input_data).with_context(|| format!("failed to encode {}", input_path.display()))?;

    let written = if args.text {
        let text = encoded.bits.to_string();
        write_output(output_path, text.as_bytes())?;
        let sidecar = save_frequency_table(&encoded.frequencies, output_path)
            .with_context(|| format!("failed to save the frequency table for {}", output_path.display()))?;
        eprintln!("frequency table saved to {}", sidecar.display());
        text.len()
    } else {
        let container = encoded.to_container()?;
        write_output(output_path, &container)?;
        container.len()
    };

    if_tracing! {
        tracing::info!(
            event = "encode_complete",
            input = %input_path.display(),
            output = %output_path.display(),
            text = args.text,
            bit_len = encoded.bits.len(),
            output_len = written,
            "encode finished"
        );
    }
    Ok(())
}
