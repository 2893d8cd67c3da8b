//! 重建后的数据集来源记录.

use super::paths;
use super::roi::{RawRoi, Roi};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 一个原始文件的全部来源信息.
///
/// 以 `original` 为唯一键. 重建结束后不再修改.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceRecord {
    /// 原始文件路径.
    pub original: String,

    /// 派生 (layered) 文件路径.
    pub derived: String,

    /// 由 `derived` 推导出的新掩码路径.
    pub new_mask: String,

    /// 原始文件在 fits 目录下的对应路径.
    pub fits_source: Option<String>,

    /// 标注掩码在 fits 目录下的对应路径.
    pub fits_mask: Option<String>,

    /// 标注掩码.
    pub mask: Option<String>,

    /// 标注 dat 文件.
    pub dat: Option<String>,

    /// 标注日志, 由 `dat` 推导.
    pub log: Option<String>,

    /// ROI.
    pub roi: Option<Roi>,

    /// 背景值, 默认为 0.
    pub background: i64,
}

impl SourceRecord {
    /// 由一条重命名事件创建记录.
    pub fn new(original: &str, derived: &str) -> Self {
        Self {
            original: original.to_string(),
            derived: derived.to_string(),
            new_mask: paths::new_mask_path(derived),
            fits_source: paths::fits_path(original),
            fits_mask: None,
            mask: None,
            dat: None,
            log: None,
            roi: None,
            background: 0,
        }
    }

    /// 重复出现的重命名事件覆盖派生路径.
    pub(crate) fn rename(&mut self, derived: &str) {
        self.derived = derived.to_string();
        self.new_mask = paths::new_mask_path(derived);
    }

    /// 关联配对事件.
    pub(crate) fn pair(&mut self, mask: &str, dat: &str) {
        self.mask = Some(mask.to_string());
        self.fits_mask = paths::fits_path(mask);
        self.dat = Some(dat.to_string());
        self.log = Some(paths::log_path_from_dat(dat));
    }
}

/// 日志中的一次原始 ROI 观测 (未经裁剪), 用于输出 `rois.csv`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoiObservation {
    /// ROI 所属文件.
    pub file: String,

    /// 原始数值.
    pub roi: RawRoi,
}

/// 一份 `dataset.log` 重建出的全部来源信息.
///
/// 记录按原始文件第一次被重命名的顺序排列.
#[derive(Clone, Debug, Default)]
pub struct Provenance {
    pub(crate) records: Vec<SourceRecord>,
    pub(crate) index: HashMap<String, usize>,
    pub(crate) renames: Vec<(String, String)>,
    pub(crate) observations: Vec<RoiObservation>,
}

impl Provenance {
    /// 全部记录.
    #[inline]
    pub fn records(&self) -> &[SourceRecord] {
        &self.records
    }

    /// 按原始文件路径查找记录.
    pub fn get(&self, original: &str) -> Option<&SourceRecord> {
        self.index.get(original).map(|&i| &self.records[i])
    }

    /// 记录个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// 是否没有任何记录.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 按日志顺序排列的全部重命名事件 `(original, derived)`, 包括重复者.
    #[inline]
    pub fn renames(&self) -> &[(String, String)] {
        &self.renames
    }

    /// 按日志顺序排列的全部原始 ROI 观测.
    #[inline]
    pub fn roi_observations(&self) -> &[RoiObservation] {
        &self.observations
    }

    pub(crate) fn get_mut(&mut self, original: &str) -> Option<&mut SourceRecord> {
        self.index.get(original).map(|&i| &mut self.records[i])
    }

    /// 插入或更新一条重命名记录, 返回记录下标.
    pub(crate) fn upsert_rename(&mut self, original: &str, derived: &str) -> usize {
        self.renames.push((original.to_string(), derived.to_string()));
        match self.index.get(original) {
            Some(&i) => {
                self.records[i].rename(derived);
                i
            }
            None => {
                let i = self.records.len();
                self.records.push(SourceRecord::new(original, derived));
                self.index.insert(original.to_string(), i);
                i
            }
        }
    }
}
