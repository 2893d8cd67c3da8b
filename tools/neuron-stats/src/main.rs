//! 统计神经元标注点之间的几何关系.
//!
//! ```text
//! neuron-stats --data ./images --width 128 --height 128 --depth 16
//! ```

use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use worm_berry::dataset::DatasetDir;
use worm_berry::geometry::points::read_point_sets;
use worm_berry::geometry::summary::{DistanceReport, Summary};
use worm_berry::geometry::{ImageSize, NormalizeError, PointSet};

/// Look at the worm annotation data and generate some stats.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// The path to the images we used on this network (must hold `log.csv`).
    #[arg(long, default_value = "./images")]
    data: PathBuf,

    /// The width of the input and output images.
    #[arg(long, default_value_t = 128)]
    width: usize,

    /// The height of the input and output images.
    #[arg(long, default_value_t = 128)]
    height: usize,

    /// The depth of the input and output images.
    #[arg(long, default_value_t = 16)]
    depth: usize,

    /// Log level (overrides `$WORM_LOG`).
    #[arg(long = "log-level")]
    log_level: Option<log::LevelFilter>,
}

fn describe_into<W: Write>(name: &str, s: &Summary, w: &mut W) -> io::Result<()> {
    write!(
        w,
        "{name} mean / std / min / max: {:.6} {:.6} {:.6} {:.6}",
        s.mean, s.std, s.min, s.max
    )
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    utils::init_logger(args.log_level);

    let size = ImageSize {
        width: args.width,
        height: args.height,
        depth: args.depth,
    };
    let path = DatasetDir::new(&args.data).point_log_path();
    let sets = read_point_sets(&path)
        .with_context(|| format!("{} must exist along with the images", path.display()))?;
    log::info!("Loaded {} annotations from {}", sets.len(), path.display());

    let normalized = normalize(&sets, size)?;
    let Some(report) = DistanceReport::of(&normalized) else {
        log::warn!("No annotation found in {}", path.display());
        return Ok(());
    };

    utils::sep();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (name, s) in [
        ("ASI", &report.asi),
        ("ASJ", &report.asj),
        ("Skews ASI - ASJ", &report.skew),
        ("ASI to ASJ", &report.midpoint),
    ] {
        describe_into(name, s, &mut out)?;
        writeln!(out)?;
    }
    drop(out);
    utils::sep();
    Ok(())
}

#[cfg(feature = "rayon")]
fn normalize(sets: &[PointSet], size: ImageSize) -> Result<Vec<PointSet>, NormalizeError> {
    worm_berry::geometry::par_normalize_all(sets, size)
}

#[cfg(not(feature = "rayon"))]
fn normalize(sets: &[PointSet], size: ImageSize) -> Result<Vec<PointSet>, NormalizeError> {
    worm_berry::geometry::normalize_all(sets, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_into() {
        let s = Summary {
            mean: 0.5,
            std: 0.25,
            min: 0.0,
            max: 1.0,
        };
        let mut buf = Vec::new();
        describe_into("ASI", &s, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "ASI mean / std / min / max: 0.500000 0.250000 0.000000 1.000000"
        );
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["neuron-stats"]);
        assert_eq!((args.width, args.height, args.depth), (128, 128, 16));
        assert_eq!(args.data, PathBuf::from("./images"));
    }
}
