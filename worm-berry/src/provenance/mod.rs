//! 数据集来源重建.
//!
//! 从数据集目录下的 `dataset.log` 重建每个原始文件的派生文件、标注文件、
//! ROI 和背景值, 并输出:
//!
//! - `master_dataset.csv`: 每个实际存在的 (layered, 掩码) 文件对一行;
//! - `unet_dataset.csv`: 直接由目录列表得到的 U-Net 输入/输出对;
//! - (可选) `pairs.csv`, `pairs_fits.csv`, `rois.csv`.
//!
//! 致命错误与可恢复错误的划分见 [`RetrofitError`].

mod augment;
mod error;
mod event;
mod pairs;
mod parser;
pub mod paths;
mod record;
mod roi;
mod table;
mod unet;

pub use augment::{find_files, resolve_variants, AugmentedVariant};
pub use error::RetrofitError;
pub use event::LogEvent;
pub use pairs::{write_pairs, write_pairs_fits, write_rois};
pub use parser::{parse_log, LogParser};
pub use record::{Provenance, RoiObservation, SourceRecord};
pub use roi::{CropBox, RawRoi, Roi};
pub use table::{write_master, MasterLayout, MasterRow, RetrofitConfig, RoiPolicy};
pub use unet::{unet_pairs, write_unet};

use crate::consts::{PAIRS_CSV, PAIRS_FITS_CSV, ROIS_CSV};
use crate::dataset::DatasetDir;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// 重建结果.
pub type RetrofitResult<T> = Result<T, RetrofitError>;

/// 读取并解析 `dir/dataset.log`.
///
/// 目录或日志不存在时记录警告并返回 `Ok(None)`: 没有日志不是错误,
/// 只是不产出主数据表.
pub fn read_provenance(dir: &Path) -> RetrofitResult<Option<Provenance>> {
    let path = DatasetDir::new(dir).log_path();
    if !path.is_file() {
        log::warn!("{} does not exist, skipping reconstruction", path.display());
        return Ok(None);
    }
    let text = fs::read_to_string(&path).map_err(RetrofitError::io(&path))?;
    let prov = parse_log(&text);
    log::info!("Reconstructed {} source files from {}", prov.len(), path.display());
    Ok(Some(prov))
}

/// 由来源信息生成主数据表的全部行. 相对路径以 `base` 为起点.
///
/// 必需字段缺失的行被跳过并记录警告. 增广文件个数不一致或严格模式下缺失 ROI
/// 会中止整个过程.
pub fn master_rows(
    prov: &Provenance,
    base: &Path,
    config: &RetrofitConfig,
) -> RetrofitResult<Vec<MasterRow>> {
    let mut rows = Vec::with_capacity(prov.len());
    for rec in prov.records() {
        for variant in resolve_variants(rec, base)? {
            match MasterRow::compose(rec, &variant, config)? {
                Some(row) => rows.push(row),
                None => log::warn!("Not all keys found for {}", rec.original),
            }
        }
    }
    Ok(rows)
}

fn write_file<F>(path: &Path, f: F) -> RetrofitResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let file = File::create(path).map_err(RetrofitError::io(path))?;
    let mut w = BufWriter::new(file);
    f(&mut w)
        .and_then(|_| w.flush())
        .map_err(RetrofitError::io(path))
}

/// 重建主数据表并写入 `dir/master_dataset.csv`.
///
/// 没有日志时不写文件并返回 `Ok(None)`, 否则返回写出的行.
pub fn retrofit(dir: &Path, config: &RetrofitConfig) -> RetrofitResult<Option<Vec<MasterRow>>> {
    let Some(prov) = read_provenance(dir)? else {
        return Ok(None);
    };
    let rows = master_rows(&prov, dir, config)?;
    write_master_file(&DatasetDir::new(dir).master_path(), config.layout, &rows)?;
    Ok(Some(rows))
}

/// 将主数据表写入 `path`.
pub fn write_master_file(path: &Path, layout: MasterLayout, rows: &[MasterRow]) -> RetrofitResult<()> {
    write_file(path, |w| write_master(layout, rows, w))?;
    log::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// 生成 U-Net 训练对并写入 `dir/unet_dataset.csv`.
///
/// 目录不存在时记录警告并返回 `Ok(None)`, 否则返回写出的行数.
pub fn retrofit_unet(dir: &Path) -> RetrofitResult<Option<usize>> {
    if !dir.is_dir() {
        log::warn!("{} is not a directory, skipping U-Net pairs", dir.display());
        return Ok(None);
    }
    let pairs = unet_pairs(dir)?;
    let path = DatasetDir::new(dir).unet_path();
    write_file(&path, |w| write_unet(&pairs, w))?;
    log::info!("Wrote {} pairs to {}", pairs.len(), path.display());
    Ok(Some(pairs.len()))
}

/// 写入 `pairs.csv`, `pairs_fits.csv` 和 `rois.csv`.
pub fn write_pair_tables(dir: &Path, prov: &Provenance) -> RetrofitResult<()> {
    write_file(&dir.join(PAIRS_CSV), |w| write_pairs(prov, w))?;
    write_file(&dir.join(PAIRS_FITS_CSV), |w| write_pairs_fits(prov, w))?;
    write_file(&dir.join(ROIS_CSV), |w| write_rois(prov, w))?;
    Ok(())
}
