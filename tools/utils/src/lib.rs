//! 命令行工具依赖的通用组件.

use std::env;
use std::path::PathBuf;

const SEP: &str = "--------------------------------------------------------";

/// 简单分隔线.
#[inline]
pub fn sep() {
    println!("{SEP}");
}

/// 简单分隔线.
#[inline]
pub fn sep_to<W: std::io::Write>(mut w: W) -> std::io::Result<()> {
    writeln!(&mut w, "{SEP}")
}

/// 获取数据集基本路径.
///
/// 1. 若 `arg` 非空, 则返回其值;
/// 2. 若环境变量 `$WORM_DATASET_DIR` 非空, 则返回其值;
/// 3. 否则, 返回 `$HOME/dataset`.
pub fn dataset_dir_from_env_or_home(arg: Option<PathBuf>) -> Option<PathBuf> {
    arg.or_else(|| env::var_os("WORM_DATASET_DIR").map(PathBuf::from))
        .or_else(worm_berry::dataset::home_dataset_dir)
}

/// 初始化日志输出.
///
/// 日志级别依次取 `level`, 环境变量 `$WORM_LOG`, 最后默认为 `info`.
pub fn init_logger(level: Option<log::LevelFilter>) {
    let level = level
        .or_else(|| env::var("WORM_LOG").ok().and_then(|s| s.parse().ok()))
        .unwrap_or(log::LevelFilter::Info);
    if let Err(e) = simple_logger::SimpleLogger::new().with_level(level).init() {
        eprintln!("Logger already initialized: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dir_wins() {
        let p = PathBuf::from("/data/queelim");
        assert_eq!(dataset_dir_from_env_or_home(Some(p.clone())), Some(p));
    }

    #[test]
    fn test_sep_to() {
        let mut buf = Vec::new();
        sep_to(&mut buf).unwrap();
        assert_eq!(buf.len(), SEP.len() + 1);
    }
}
