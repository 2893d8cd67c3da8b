//! 命令行参数.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use worm_berry::consts::{DEFAULT_ROI_DEPTH, DEFAULT_ROI_WIDTH};
use worm_berry::provenance::{MasterLayout, RetrofitConfig, RoiPolicy};

/// Create a set of CSVs for our datasets, retrofitting from the logs.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// The path to the dataset we want to retrofit.
    /// Falls back to `$HOME/dataset`.
    #[arg(long, env = "WORM_DATASET_DIR")]
    pub dataset: Option<PathBuf>,

    /// Target crop width (and height) of each ROI.
    #[arg(
        long = "roi-width",
        alias = "roiwh",
        default_value_t = DEFAULT_ROI_WIDTH,
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    pub roi_width: i64,

    /// Target crop depth of each ROI.
    #[arg(
        long = "roi-depth",
        alias = "roid",
        default_value_t = DEFAULT_ROI_DEPTH,
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    pub roi_depth: i64,

    /// Column layout of `master_dataset.csv`.
    #[arg(long, value_enum, default_value_t = Layout::Classic)]
    pub layout: Layout,

    /// What to do with a source that has no ROI in the log.
    #[arg(long = "roi-policy", value_enum, default_value_t = Policy::ZeroFill)]
    pub roi_policy: Policy,

    /// Also write `pairs.csv`, `pairs_fits.csv` and `rois.csv`.
    #[arg(long)]
    pub pairs: bool,

    /// Log level (overrides `$WORM_LOG`).
    #[arg(long = "log-level")]
    pub log_level: Option<log::LevelFilter>,
}

/// `--layout`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Layout {
    /// No `fitsmask` column.
    Classic,
    /// With a `fitsmask` column after `fitssource`.
    FitsMask,
}

/// `--roi-policy`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Policy {
    /// Write a zero ROI.
    ZeroFill,
    /// Abort the run.
    Strict,
}

impl Args {
    /// 转换为库配置.
    pub fn config(&self) -> RetrofitConfig {
        RetrofitConfig {
            roi_width: self.roi_width,
            roi_depth: self.roi_depth,
            layout: match self.layout {
                Layout::Classic => MasterLayout::Classic,
                Layout::FitsMask => MasterLayout::WithFitsMask,
            },
            roi_policy: match self.roi_policy {
                Policy::ZeroFill => RoiPolicy::ZeroFill,
                Policy::Strict => RoiPolicy::Strict,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_defaults() {
        Args::command().debug_assert();
        let args = Args::parse_from(["retrofit", "--dataset", "/data/x"]);
        assert_eq!(args.config(), RetrofitConfig::default());
        assert!(!args.pairs);
    }

    #[test]
    fn test_args_variants() {
        let args = Args::parse_from([
            "retrofit",
            "--dataset",
            "/data/x",
            "--roiwh",
            "128",
            "--roi-depth",
            "16",
            "--layout",
            "fits-mask",
            "--roi-policy",
            "strict",
        ]);
        let cfg = args.config();
        assert_eq!((cfg.roi_width, cfg.roi_depth), (128, 16));
        assert_eq!(cfg.layout, MasterLayout::WithFitsMask);
        assert_eq!(cfg.roi_policy, RoiPolicy::Strict);
    }

    #[test]
    fn test_args_reject_non_positive_roi() {
        for bad in [["--roi-width", "0"], ["--roi-depth=-5", "--pairs"]] {
            let argv = ["retrofit", "--dataset", "/data/x"].into_iter().chain(bad);
            let res = Args::try_parse_from(argv);
            assert!(res.is_err(), "{bad:?} accepted");
        }
        assert!(Args::try_parse_from(["retrofit", "--roi-width", "1"]).is_ok());
    }
}
