use clap::Parser;

use crate::cli::{Cli, Command};

mod cli;

fn main() -> anyhow::Result<()> {
    huffpack::if_tracing! {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_target(false)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }

    let cli = Cli::parse();
    match cli.command {
        Command::Encode(args) => cli::encode::encode(args),
        Command::Decode(args) => cli::decode::decode(args),
        Command::Test(args) => cli::test::test(args),
        Command::Codes(args) => cli::inspect::codes(args),
        Command::Stats(args) => cli::inspect::stats(args),
        Command::Tree(args) => cli::inspect::tree(args),
        Command::Generate(args) => cli::generate::generate(args),
    }
}
