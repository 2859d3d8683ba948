use anyhow::{Context, Result};
use huffpack::generate::{SampleDistribution, generate as generate_sample};
use huffpack::if_tracing;

use crate::cli::{GenerateArgs, read_input, write_output};

pub fn generate(args: GenerateArgs) -> Result<()> {
    let distribution = match &args.from_file {
        Some(path) => {
            let json = read_input(path)?;
            serde_json::from_slice::<SampleDistribution>(&json).with_context(|| format!("{} is not a symbol distribution", path.display()))?
        }
        None => SampleDistribution::default(),
    };

    let data: String = generate_sample(&distribution, args.seed)?.into_iter().collect();
    write_output(&args.output, data.as_bytes())?;

    if_tracing! {
        tracing::info!(
            event = "generate_complete",
            output = %args.output.display(),
            seed = args.seed,
            symbols = distribution.entries.len(),
            len = data.len(),
            "sample data written"
        );
    }
    eprintln!("data written to {}", args.output.display());
    Ok(())
}
