//! 路径推导.
//!
//! 所有函数都是纯字符串变换, 不访问文件系统.

use crate::consts::FITS_REPLACEMENTS;

/// 由派生的 layered 文件路径得到新的掩码文件路径.
///
/// 将所有 `_layered` 替换为 `_mask`. 不含 `_layered` 时原样返回.
pub fn new_mask_path(derived: &str) -> String {
    derived.replace("_layered", "_mask")
}

/// 将 `path` 中替换表的目录段替换为对应的 fits 目录.
///
/// - 按 `table` 顺序查找, 只有第一个出现在 `path` 中的条目会被应用;
/// - 没有任何条目命中时返回 `None`.
pub fn replace_fits_dir(path: &str, table: &[(&str, &str)]) -> Option<String> {
    table
        .iter()
        .find(|(find, _)| path.contains(find))
        .map(|(find, replace)| path.replace(find, replace))
}

/// 将末尾的 `.tiff` 扩展名换为 `.fits`. 其它扩展名原样返回.
pub fn swap_tiff_ext(path: &str) -> String {
    match path.strip_suffix(".tiff") {
        Some(stem) => format!("{stem}.fits"),
        None => path.to_string(),
    }
}

/// 求原始 (或掩码) 文件在 fits 目录下的对应路径.
///
/// 先用 [`FITS_REPLACEMENTS`] 替换目录段, 再交换扩展名.
/// 目录段不命中时返回 `None`.
pub fn fits_path(path: &str) -> Option<String> {
    replace_fits_dir(path, &FITS_REPLACEMENTS).map(|p| swap_tiff_ext(&p))
}

/// 由 dat 文件路径得到标注日志路径: 后缀 `_2.dat` 换为 `_2.log`.
///
/// 不以 `_2.dat` 结尾的路径原样返回.
pub fn log_path_from_dat(dat: &str) -> String {
    match dat.strip_suffix("_2.dat") {
        Some(stem) => format!("{stem}_2.log"),
        None => {
            log::debug!("Dat file without `_2.dat` suffix: {dat}");
            dat.to_string()
        }
    }
}

/// 派生文件名在增广搜索时使用的前缀: 文件名中第一个 `_` 之前的部分.
pub fn augment_prefix(file_name: &str) -> &str {
    file_name.split('_').next().unwrap_or(file_name)
}
