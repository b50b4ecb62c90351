use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gridfinder_lib::cli::{Cli, Commands};
use gridfinder_lib::commands;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG when set, `info` otherwise; `log` records from the libraries
    // are bridged in.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => {
            let summary = commands::run(&args)?;
            println!(
                "{} cells reached, {} on the network",
                summary.reached, summary.network
            );
        }
        Commands::Estimate(args) => {
            let est = commands::estimate(&args)?;
            println!("{}", serde_json::to_string_pretty(&est)?);
            println!("total: {est}");
        }
        Commands::Score(args) => {
            let m = commands::score(&args)?;
            println!("{}", serde_json::to_string_pretty(&m)?);
            if let Some(p) = m.precision() {
                println!("precision: {p:.4}");
            }
            if let Some(r) = m.recall() {
                println!("recall: {r:.4}");
            }
            if let Some(f1) = m.f1() {
                println!("f1: {f1:.4}");
            }
        }
    }
    Ok(())
}
