//! 通用常量.

/// 旧目录名到 fits 目录名的替换表.
///
/// 按顺序匹配, 第一个命中的条目生效, 且至多应用一个条目.
pub const FITS_REPLACEMENTS: [(&str, &str); 2] = [
    ("ins-6-mCherry/", "mcherry_fits/"),
    ("ins-6-mCherry_2/", "mcherry_2_fits/"),
];

/// 默认 ROI 裁剪宽 (同时也是高).
pub const DEFAULT_ROI_WIDTH: i64 = 200;

/// 默认 ROI 裁剪深度.
pub const DEFAULT_ROI_DEPTH: i64 = 51;

/// 数据集目录下的事件日志文件名.
pub const DATASET_LOG: &str = "dataset.log";

/// 主数据表文件名.
pub const MASTER_DATASET_CSV: &str = "master_dataset.csv";

/// U-Net 训练输入/输出对文件名.
pub const UNET_DATASET_CSV: &str = "unet_dataset.csv";

/// 原始文件到派生文件的对照表文件名.
pub const PAIRS_CSV: &str = "pairs.csv";

/// fits 原始文件到派生文件的对照表文件名.
pub const PAIRS_FITS_CSV: &str = "pairs_fits.csv";

/// 原始 ROI 观测表文件名.
pub const ROIS_CSV: &str = "rois.csv";

/// 神经元标注点文件名.
pub const POINT_LOG_CSV: &str = "log.csv";

/// 数据集中体数据文件的扩展名过滤器.
pub const FITS_EXT: &str = ".fits";

/// 日志行标记.
pub mod marker {
    /// 重命名事件前缀.
    pub const RENAMING: &str = "Renaming ";

    /// 重命名事件中原始路径和派生路径的分隔.
    pub const TO: &str = " to ";

    /// 背景值事件.
    pub const BACKGROUND: &str = "Background";

    /// 配对事件前缀.
    pub const PAIRING: &str = "Pairing ";

    /// 配对事件中掩码和 dat 文件的分隔.
    pub const WITH: &str = " with ";

    /// 配对事件中 dat 文件和原始文件的分隔.
    pub const AND: &str = " and ";

    /// 新格式 ROI 事件.
    pub const ROI_NEW: &str = ",ROI,";

    /// 旧格式 ROI 事件.
    pub const ROI_OLD: &str = "ROI: ";

    /// 旧格式掩码事件前缀.
    pub const MASKING: &str = "Masking: ";

    /// 堆叠事件前缀.
    pub const STACKING: &str = "Stacking: ";
}
