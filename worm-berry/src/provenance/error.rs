//! 重建过程中的致命错误.
//!
//! 单条记录层面的问题 (字段缺失, 数值无法解析) 不是错误, 只记录日志并跳过.

use std::path::PathBuf;
use thiserror::Error;

/// 数据集来源重建的致命错误.
#[derive(Debug, Error)]
pub enum RetrofitError {
    /// 底层 I/O 错误.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// 出错的路径.
        path: PathBuf,
        /// 原始错误.
        #[source]
        source: std::io::Error,
    },

    /// 增广搜索得到的掩码与 layered 文件个数不一致.
    #[error("augmented files of {original} are inconsistent: {masks} masks vs {layered} layered")]
    AugmentMismatch {
        /// 原始文件.
        original: String,
        /// 找到的掩码个数.
        masks: usize,
        /// 找到的 layered 文件个数.
        layered: usize,
    },

    /// 数据集目录下 layered 与掩码文件个数不一致.
    #[error("dataset directory holds {layered} layered files but {masks} masks")]
    UnetMismatch {
        /// layered 文件个数.
        layered: usize,
        /// 掩码个数.
        masks: usize,
    },

    /// 严格模式下某个原始文件没有 ROI.
    #[error("no ROI recorded for {0}")]
    MissingRoi(String),
}

impl RetrofitError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
