//! 数据集目录.

use crate::consts::{DATASET_LOG, MASTER_DATASET_CSV, POINT_LOG_CSV, UNET_DATASET_CSV};
use std::path::{Path, PathBuf};

/// 获取 `{用户主目录}/dataset` 目录.
pub fn home_dataset_dir() -> Option<PathBuf> {
    let mut ans = dirs::home_dir()?;
    ans.push("dataset");
    Some(ans)
}

/// 获取 `{用户主目录}/dataset` 目录下给定继续项组成的全路径.
pub fn home_dataset_dir_with<P: AsRef<Path>, I: IntoIterator<Item = P>>(it: I) -> Option<PathBuf> {
    let mut ans = home_dataset_dir()?;
    ans.extend(it);
    Some(ans)
}

/// 一个数据集根目录, 以及其下约定的文件.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DatasetDir {
    root: PathBuf,
}

impl DatasetDir {
    /// 初始化. 不检查目录是否存在.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_owned(),
        }
    }

    /// 根目录.
    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 根目录是否存在.
    #[inline]
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// `dataset.log`.
    #[inline]
    pub fn log_path(&self) -> PathBuf {
        self.root.join(DATASET_LOG)
    }

    /// `master_dataset.csv`.
    #[inline]
    pub fn master_path(&self) -> PathBuf {
        self.root.join(MASTER_DATASET_CSV)
    }

    /// `unet_dataset.csv`.
    #[inline]
    pub fn unet_path(&self) -> PathBuf {
        self.root.join(UNET_DATASET_CSV)
    }

    /// 标注点 `log.csv`.
    #[inline]
    pub fn point_log_path(&self) -> PathBuf {
        self.root.join(POINT_LOG_CSV)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_dir() {
        let d = DatasetDir::new("/data/queelim");
        assert_eq!(d.log_path(), Path::new("/data/queelim/dataset.log"));
        assert_eq!(d.master_path(), Path::new("/data/queelim/master_dataset.csv"));
        assert_eq!(d.unet_path(), Path::new("/data/queelim/unet_dataset.csv"));
        assert_eq!(d.point_log_path(), Path::new("/data/queelim/log.csv"));
        assert!(!d.exists());
    }

    #[test]
    fn test_home_dataset_dir_with() {
        if let Some(home) = home_dataset_dir() {
            assert_eq!(home_dataset_dir_with(["a", "b"]), Some(home.join("a").join("b")));
        }
    }
}
