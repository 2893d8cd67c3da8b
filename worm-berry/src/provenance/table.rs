//! 主数据表 `master_dataset`.

use super::augment::AugmentedVariant;
use super::error::RetrofitError;
use super::record::SourceRecord;
use super::roi::CropBox;
use crate::consts::{DEFAULT_ROI_DEPTH, DEFAULT_ROI_WIDTH};
use itertools::Itertools;
use std::io::{self, Write};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 主数据表的列布局.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum MasterLayout {
    /// 不含 `fitsmask` 列.
    #[default]
    Classic,

    /// 在 `fitssource` 之后多一列 `fitsmask`, 且该列为必需字段.
    WithFitsMask,
}

impl MasterLayout {
    /// 表头各列.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Classic => &[
                "ogsource", "ogmask", "fitssource", "annolog", "annodat", "newsource", "newmask",
                "roix", "roiy", "roiz", "roiwh", "roid", "back",
            ],
            Self::WithFitsMask => &[
                "ogsource", "ogmask", "fitssource", "fitsmask", "annolog", "annodat", "newsource",
                "newmask", "roix", "roiy", "roiz", "roiwh", "roid", "back",
            ],
        }
    }
}

/// 原始文件没有 ROI 时的处理方式.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum RoiPolicy {
    /// 以全零 ROI 填充.
    #[default]
    ZeroFill,

    /// 视为致命错误, 中止整个重建.
    Strict,
}

/// 重建配置.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RetrofitConfig {
    /// 目标裁剪宽 (同时也是高).
    pub roi_width: i64,

    /// 目标裁剪深度.
    pub roi_depth: i64,

    /// 列布局.
    pub layout: MasterLayout,

    /// 缺失 ROI 的处理方式.
    pub roi_policy: RoiPolicy,
}

impl Default for RetrofitConfig {
    fn default() -> Self {
        Self {
            roi_width: DEFAULT_ROI_WIDTH,
            roi_depth: DEFAULT_ROI_DEPTH,
            layout: MasterLayout::default(),
            roi_policy: RoiPolicy::default(),
        }
    }
}

/// 主数据表中的一行. 字段名即列名.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
#[allow(missing_docs)]
pub struct MasterRow {
    pub ogsource: String,
    pub ogmask: String,
    pub fitssource: String,
    /// 仅在 [`MasterLayout::WithFitsMask`] 下存在.
    pub fitsmask: Option<String>,
    pub annolog: String,
    pub annodat: String,
    pub newsource: String,
    pub newmask: String,
    /// `roix, roiy, roiz, roiwh, roid` 五列.
    pub roi: CropBox,
    pub back: i64,
}

impl MasterRow {
    /// 由记录和它的一个实际文件对组成一行.
    ///
    /// - 必需字段缺失或 ROI 无法裁剪时返回 `Ok(None)`, 由调用者记录并跳过;
    /// - ROI 缺失且为 [`RoiPolicy::ZeroFill`] 时记录警告并以全零填充;
    /// - ROI 缺失且 `config.roi_policy` 为 [`RoiPolicy::Strict`] 时返回
    ///   [`RetrofitError::MissingRoi`].
    pub fn compose(
        rec: &SourceRecord,
        variant: &AugmentedVariant,
        config: &RetrofitConfig,
    ) -> Result<Option<Self>, RetrofitError> {
        let roi = match (rec.roi, config.roi_policy) {
            (Some(roi), _) => match roi.center_crop(config.roi_width, config.roi_depth) {
                Some(crop) => crop,
                None => {
                    log::warn!(
                        "ROI of {} cannot be cropped to {}x{}",
                        rec.original,
                        config.roi_width,
                        config.roi_depth
                    );
                    return Ok(None);
                }
            },
            (None, RoiPolicy::ZeroFill) => {
                log::warn!("No ROI for {}, zero-filled", rec.original);
                CropBox::ZERO
            }
            (None, RoiPolicy::Strict) => return Err(RetrofitError::MissingRoi(rec.original.clone())),
        };

        let fitsmask = match config.layout {
            MasterLayout::Classic => None,
            MasterLayout::WithFitsMask => match rec.fits_mask.clone() {
                Some(m) => Some(m),
                None => return Ok(None),
            },
        };

        let (Some(ogmask), Some(fitssource), Some(annolog), Some(annodat)) = (
            rec.mask.clone(),
            rec.fits_source.clone(),
            rec.log.clone(),
            rec.dat.clone(),
        ) else {
            return Ok(None);
        };

        Ok(Some(Self {
            ogsource: rec.original.clone(),
            ogmask,
            fitssource,
            fitsmask,
            annolog,
            annodat,
            newsource: variant.derived.clone(),
            newmask: variant.mask.clone(),
            roi,
            back: rec.background,
        }))
    }

    /// 按列顺序排列的字段.
    pub fn fields(&self) -> Vec<String> {
        let mut v = vec![
            self.ogsource.clone(),
            self.ogmask.clone(),
            self.fitssource.clone(),
        ];
        v.extend(self.fitsmask.clone());
        v.extend([
            self.annolog.clone(),
            self.annodat.clone(),
            self.newsource.clone(),
            self.newmask.clone(),
        ]);
        v.extend(
            [
                self.roi.x,
                self.roi.y,
                self.roi.z,
                self.roi.width,
                self.roi.depth,
                self.back,
            ]
            .map(|n| n.to_string()),
        );
        v
    }
}

/// 将表头和全部 `rows` 以逗号分隔写入 `w`.
pub fn write_master<W: Write>(layout: MasterLayout, rows: &[MasterRow], w: &mut W) -> io::Result<()> {
    writeln!(w, "{}", layout.columns().join(","))?;
    for row in rows {
        writeln!(w, "{}", row.fields().iter().join(","))?;
    }
    Ok(())
}
