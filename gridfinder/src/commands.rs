//! Implementations of the `run`, `estimate` and `score` subcommands.

use gridfinder_core::Raster;
use gridfinder_paths::{
    ConfusionMatrix, GridInputs, MemoryEstimate, Propagator, estimate_mem_use,
    eval_confusion_matrix, get_targets_costs, threshold_distances,
};

use crate::cli::{EstimateArgs, RunArgs, ScoreArgs};
use crate::config::RunConfig;
use crate::document::{DistanceDocument, GridDocument, MaskDocument, read_json, write_json};
use crate::error::CliError;
use crate::snapshot::SnapshotWriter;

/// What a finished `run` produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub memory: MemoryEstimate,
    /// Cells with a known distance.
    pub reached: usize,
    /// Cells within tolerance of the network.
    pub network: usize,
    pub snapshots: usize,
}

fn load_inputs(doc: &GridDocument) -> Result<GridInputs<f64>, CliError> {
    let targets = doc.target_raster()?;
    let costs = doc.cost_raster()?;
    Ok(get_targets_costs(&targets, costs, doc.transform)?)
}

/// Propagate from the grid document's targets and write the results.
pub fn run(args: &RunArgs) -> Result<RunSummary, CliError> {
    let config = RunConfig::load(args.config.as_deref())?.merge(args.overrides())?;
    let doc: GridDocument = read_json(&args.input)?;
    let inputs = load_inputs(&doc)?;

    let memory = estimate_mem_use(&inputs.targets, &inputs.costs);
    log::info!(
        "{} grid, start {}, estimated memory {memory}",
        inputs.targets.shape(),
        inputs.start
    );

    let propagator = Propagator::new(&inputs.targets, &inputs.costs, inputs.start)?
        .with_config(config.propagation())?;
    let mut snapshots =
        SnapshotWriter::new(config.snapshot_dir.clone(), inputs.transform, config.silent)?;
    let dist = match propagator.run(&mut snapshots) {
        Ok(dist) => dist,
        Err(e) => {
            snapshots.discard();
            return Err(e.into());
        }
    };
    let snapshots = snapshots.finish()?;

    let network = threshold_distances(&dist, config.tolerance);
    write_json(&args.out_dist, &DistanceDocument::new(&dist, inputs.transform))?;
    if let Some(path) = &args.out_network {
        write_json(path, &MaskDocument::new(&network, inputs.transform))?;
    }

    let summary = RunSummary {
        memory,
        reached: count(&dist, |d| !d.is_nan()),
        network: count(&network, |&v| v != 0),
        snapshots,
    };
    log::info!(
        "reached {} cells, {} on the network",
        summary.reached,
        summary.network
    );
    Ok(summary)
}

/// Estimate the working set of a run over the grid document.
pub fn estimate(args: &EstimateArgs) -> Result<MemoryEstimate, CliError> {
    let doc: GridDocument = read_json(&args.input)?;
    let inputs = load_inputs(&doc)?;
    Ok(estimate_mem_use(&inputs.targets, &inputs.costs))
}

/// Compare a predicted mask with a ground-truth mask.
pub fn score(args: &ScoreArgs) -> Result<ConfusionMatrix, CliError> {
    let truth: MaskDocument = read_json(&args.truth)?;
    let prediction: MaskDocument = read_json(&args.prediction)?;
    Ok(eval_confusion_matrix(
        &truth.raster()?,
        &prediction.raster()?,
        args.scale,
    )?)
}

fn count<T>(r: &Raster<T>, pred: impl Fn(&T) -> bool) -> usize {
    r.as_slice().iter().filter(|v| pred(v)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridfinder_core::GridError;
    use std::path::Path;

    const GRID: &str = r#"{
        "transform": [100.0, 0.0, 0.0, 0.0, -100.0, 500.0],
        "targets": [
            [1, 0, 0, 0, 0],
            [0, 0, 0, 0, 0],
            [0, 0, 0, 0, 1]
        ],
        "costs": [
            [5, 1, 1, 1, 5],
            [5, 5, 5, 1, 5],
            [5, 5, 5, 5, 5]
        ]
    }"#;

    fn write(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    fn run_args(dir: &Path, input: std::path::PathBuf) -> RunArgs {
        RunArgs {
            input,
            out_dist: dir.join("dist.json"),
            out_network: Some(dir.join("network.json")),
            config: None,
            tolerance: None,
            barrier: None,
            snapshot_dir: None,
            silent: true,
        }
    }

    #[test]
    fn run_writes_distance_and_network() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "grid.json", GRID);
        let summary = run(&run_args(dir.path(), input)).unwrap();

        assert_eq!(summary.reached, 15);
        assert_eq!(summary.snapshots, 0);

        let dist: DistanceDocument = read_json(&dir.path().join("dist.json")).unwrap();
        assert_eq!(dist.transform.a, 100.0);
        assert_eq!(dist.distances[0][0], Some(0.0));

        let net: MaskDocument = read_json(&dir.path().join("network.json")).unwrap();
        // Cheap route along the top row, then diagonally down to the
        // second target.
        assert_eq!(net.mask[0], vec![1, 1, 1, 0, 0]);
        assert_eq!(net.mask[1], vec![0, 0, 0, 1, 0]);
        assert_eq!(net.mask[2], vec![0, 0, 0, 0, 1]);
        assert_eq!(summary.network, 5);
        assert_eq!(dist.distances[0][3], Some(1.0));
        assert_eq!(dist.distances[1][0], Some(5.0));
    }

    #[test]
    fn run_honours_config_file_and_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "grid.json", GRID);
        let snaps = dir.path().join("snaps");
        let cfg = write(
            dir.path(),
            "gridfinder.toml",
            &format!("tolerance = 5.0\nsnapshot_dir = {:?}\n", snaps.display().to_string()),
        );
        let mut args = run_args(dir.path(), input);
        args.config = Some(cfg);
        let summary = run(&args).unwrap();

        // 13 of 15 cells are discovered by relaxation, each crossing a new
        // whole percent.
        assert_eq!(summary.snapshots, 13);
        assert!(snaps.join("arr006.json").is_file());
        assert!(snaps.join("arr086.json").is_file());
        // The 5 network cells plus the 6 cells one orthogonal step away.
        assert_eq!(summary.network, 11);
    }

    #[test]
    fn barrier_override_blocks_expensive_cells() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "grid.json", GRID);
        let mut args = run_args(dir.path(), input);
        args.barrier = Some(5.0);
        let summary = run(&args).unwrap();
        assert_eq!(summary.reached, 6);
        assert_eq!(summary.network, 5);
    }

    #[test]
    fn nan_barrier_flag_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "grid.json", GRID);
        let mut args = run_args(dir.path(), input);
        args.barrier = Some(f64::NAN);
        let err = run(&args).unwrap_err();
        assert!(matches!(err, CliError::Grid(GridError::InvalidBarrier(_))));
        assert!(!dir.path().join("dist.json").exists());
    }

    #[test]
    fn failed_run_leaves_no_snapshots() {
        // Three cells are discovered, each a new 20 % step, before the
        // negative cost is reached.
        let dir = tempfile::tempdir().unwrap();
        let input = write(
            dir.path(),
            "grid.json",
            r#"{"targets": [[1, 0, 0, 0, 0]], "costs": [[1, 1, 1, 1, -1]]}"#,
        );
        let snaps = dir.path().join("snaps");
        let mut args = run_args(dir.path(), input);
        args.snapshot_dir = Some(snaps.clone());
        let err = run(&args).unwrap_err();
        assert!(matches!(
            err,
            CliError::Grid(GridError::NonFiniteCost { value, .. }) if value == -1.0
        ));
        assert_eq!(std::fs::read_dir(&snaps).unwrap().count(), 0);
        assert!(!dir.path().join("dist.json").exists());
    }

    #[test]
    fn empty_targets_fail() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(
            dir.path(),
            "grid.json",
            r#"{"targets": [[0, 0]], "costs": [[1, 1]]}"#,
        );
        let err = run(&run_args(dir.path(), input)).unwrap_err();
        assert!(matches!(err, CliError::Grid(GridError::EmptyTargetSet)));
    }

    #[test]
    fn estimate_reports_breakdown() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "grid.json", GRID);
        let est = estimate(&EstimateArgs { input }).unwrap();
        assert_eq!(est.targets, 15);
        assert_eq!(est.costs, 15 * 8);
        assert_eq!(est.distances, 15 * 8);
    }

    #[test]
    fn score_compares_masks() {
        let dir = tempfile::tempdir().unwrap();
        let truth = write(dir.path(), "truth.json", r#"{"mask": [[1, 1], [0, 0]]}"#);
        let prediction = write(dir.path(), "pred.json", r#"{"mask": [[1, 0], [1, 0]]}"#);
        let m = score(&ScoreArgs {
            truth: truth.clone(),
            prediction: prediction.clone(),
            scale: None,
        })
        .unwrap();
        assert_eq!((m.tp, m.fp, m.tn, m.fn_), (1, 1, 1, 1));

        let m = score(&ScoreArgs {
            truth,
            prediction,
            scale: Some(2),
        })
        .unwrap();
        assert_eq!((m.tp, m.fp, m.tn, m.fn_), (1, 0, 0, 0));
    }
}
