use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::RunOverrides;

#[derive(Parser, Debug)]
#[command(author, version, about = "Predict electricity grid networks from cost rasters", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Propagate costs from the targets and write the distance field
    Run(RunArgs),
    /// Estimate the memory a run over a grid would need
    Estimate(EstimateArgs),
    /// Score a predicted network mask against ground truth
    Score(ScoreArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Grid document with `targets` and `costs`
    #[arg(long)]
    pub input: PathBuf,
    /// Where to write the distance field
    #[arg(long)]
    pub out_dist: PathBuf,
    /// Where to write the thresholded network mask
    #[arg(long)]
    pub out_network: Option<PathBuf>,
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Distance at or below which a cell is part of the network
    #[arg(long)]
    pub tolerance: Option<f64>,
    /// Costs at or above this value are impassable (accepts `inf`)
    #[arg(long)]
    pub barrier: Option<f64>,
    /// Write a distance snapshot here at every whole percent
    #[arg(long)]
    pub snapshot_dir: Option<PathBuf>,
    /// Do not log progress
    #[arg(long)]
    pub silent: bool,
}

impl RunArgs {
    pub fn overrides(&self) -> RunOverrides {
        RunOverrides {
            tolerance: self.tolerance,
            barrier: self.barrier,
            snapshot_dir: self.snapshot_dir.clone(),
            silent: self.silent,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct EstimateArgs {
    /// Grid document with `targets` and `costs`
    #[arg(long)]
    pub input: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Ground-truth network mask
    #[arg(long)]
    pub truth: PathBuf,
    /// Predicted network mask
    #[arg(long)]
    pub prediction: PathBuf,
    /// Compare over N×N blocks instead of single cells
    #[arg(long)]
    pub scale: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_flags() {
        let cli = Cli::try_parse_from([
            "gridfinder",
            "run",
            "--input",
            "grid.json",
            "--out-dist",
            "dist.json",
            "--barrier",
            "inf",
            "--silent",
        ])
        .unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.input, PathBuf::from("grid.json"));
        assert_eq!(args.barrier, Some(f64::INFINITY));
        assert!(args.silent);
        assert_eq!(args.overrides().tolerance, None);
    }

    #[test]
    fn score_requires_both_masks() {
        assert!(Cli::try_parse_from(["gridfinder", "score", "--truth", "t.json"]).is_err());
        let cli = Cli::try_parse_from([
            "gridfinder",
            "score",
            "--truth",
            "t.json",
            "--prediction",
            "p.json",
            "--scale",
            "10",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Score(ScoreArgs { scale: Some(10), .. })));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
