//! 程序运行函数.

use crate::cli::Args;
use crate::report::RetrofitReport;
use worm_berry::dataset::DatasetDir;
use worm_berry::provenance::{self, RetrofitResult};

/// 实际运行.
///
/// 数据集目录或日志缺失只记录警告, 不产出对应表格. 增广文件或 U-Net
/// 文件个数不一致 (以及严格模式下缺失 ROI) 会返回错误, 进程以非零状态退出.
pub fn run(args: &Args) -> RetrofitResult<RetrofitReport> {
    let Some(root) = utils::dataset_dir_from_env_or_home(args.dataset.clone()) else {
        log::warn!("No dataset directory given and no home directory found");
        return Ok(RetrofitReport::default());
    };
    let dir = DatasetDir::new(root);
    let mut report = RetrofitReport::new(dir.root());
    if !dir.exists() {
        log::warn!("Dataset directory {} does not exist", dir.root().display());
        return Ok(report);
    }

    let config = args.config();
    log::info!("Retrofitting {} with {config:?}", dir.root().display());

    if let Some(prov) = provenance::read_provenance(dir.root())? {
        report.sources = Some(prov.len());
        let rows = provenance::master_rows(&prov, dir.root(), &config)?;
        report.master_rows = Some(rows.len());
        provenance::write_master_file(&dir.master_path(), config.layout, &rows)?;

        if args.pairs {
            provenance::write_pair_tables(dir.root(), &prov)?;
            report.pair_tables = true;
        }
    }

    report.unet_rows = provenance::retrofit_unet(dir.root())?;
    Ok(report)
}
