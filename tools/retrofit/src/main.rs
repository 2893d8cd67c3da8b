//! 由 `dataset.log` 回溯生成数据集的 CSV 表.
//!
//! ```text
//! retrofit --dataset /media/proto_backup/wormz/queelim/dataset_2d_basic
//! ```

mod cli;
mod report;
mod runner;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    utils::init_logger(args.log_level);

    let report = runner::run(&args)?;
    report.analyze();
    Ok(())
}
