//! 增广文件解析.
//!
//! 日志记录之后数据集可能又被增广 (一个原始文件裁剪/旋转出多个样本),
//! 此时日志中的派生文件已不存在, 需要到其所在目录下重新搜索.

use super::error::RetrofitError;
use super::paths::augment_prefix;
use super::record::SourceRecord;
use glob::Pattern;
use itertools::Itertools;
use std::path::Path;
use walkdir::WalkDir;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 一个原始文件在磁盘上实际对应的一对 (layered, 掩码) 文件.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AugmentedVariant {
    /// layered 文件.
    pub derived: String,

    /// 掩码文件.
    pub mask: String,
}

/// 在 `dir` 下递归查找文件名匹配 `pattern` 的文件, 按完整路径字典序返回.
pub fn find_files(dir: &Path, pattern: &Pattern) -> Vec<String> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                log::warn!("Error accessing entry: {e}");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| pattern.matches(&e.file_name().to_string_lossy()))
        .map(|e| e.path().to_string_lossy().into_owned())
        .sorted()
        .collect()
}

/// 求 `rec` 在磁盘上对应的全部文件对. 相对路径以 `base` 为起点.
///
/// 1. 派生文件存在时, 只返回 `(derived, new_mask)` 一对;
/// 2. 否则在派生文件所在目录下分别搜索 `{前缀}*mask.fits` 和 `{前缀}*layered.fits`,
///   各自排序后按下标配对. 第 N 个掩码与第 N 个 layered 文件对应是隐含约定.
///   `rec.derived` 为相对路径时, 结果也是相对 `base` 的路径.
///
/// # 错误
///
/// 两类文件个数不相等时返回 [`RetrofitError::AugmentMismatch`]:
/// 此时数据集已不一致, 继续配对只会产生错误标签.
pub fn resolve_variants(
    rec: &SourceRecord,
    base: &Path,
) -> Result<Vec<AugmentedVariant>, RetrofitError> {
    let derived = base.join(&rec.derived);
    if derived.exists() {
        return Ok(vec![AugmentedVariant {
            derived: rec.derived.clone(),
            mask: rec.new_mask.clone(),
        }]);
    }

    let (Some(dir), Some(name)) = (derived.parent(), derived.file_name()) else {
        log::warn!("Derived path {} has no parent directory", rec.derived);
        return Ok(Vec::new());
    };
    let name = name.to_string_lossy();
    let prefix = Pattern::escape(augment_prefix(&name));

    let masks = find_files(dir, &glob_pattern(&prefix, "mask.fits"));
    let layered = find_files(dir, &glob_pattern(&prefix, "layered.fits"));
    if masks.len() != layered.len() {
        return Err(RetrofitError::AugmentMismatch {
            original: rec.original.clone(),
            masks: masks.len(),
            layered: layered.len(),
        });
    }
    if masks.is_empty() {
        log::warn!("No file found for {} (derived {})", rec.original, rec.derived);
    }

    // 与日志中的派生路径保持同一形式: 相对路径仍以 `base` 为起点.
    let relative = Path::new(&rec.derived).is_relative();
    let shape = |path: String| {
        if !relative {
            return path;
        }
        let rel = Path::new(&path)
            .strip_prefix(base)
            .ok()
            .map(|p| p.to_string_lossy().into_owned());
        rel.unwrap_or(path)
    };
    Ok(layered
        .into_iter()
        .zip(masks)
        .map(|(derived, mask)| AugmentedVariant {
            derived: shape(derived),
            mask: shape(mask),
        })
        .collect())
}

#[inline]
fn glob_pattern(prefix: &str, suffix: &str) -> Pattern {
    // `prefix` 已转义, `*` 和后缀都是合法的 glob 片段.
    Pattern::new(&format!("{prefix}*{suffix}")).unwrap_or_default()
}
