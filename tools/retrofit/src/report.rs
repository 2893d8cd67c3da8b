//! 运行结果.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// 一次回溯的统计.
#[derive(Debug, Default)]
pub struct RetrofitReport {
    /// 数据集目录.
    pub dir: Option<PathBuf>,

    /// 重建出的原始文件数. 没有日志时为 `None`.
    pub sources: Option<usize>,

    /// 主数据表行数.
    pub master_rows: Option<usize>,

    /// U-Net 训练对个数.
    pub unet_rows: Option<usize>,

    /// 是否写出了对照表.
    pub pair_tables: bool,
}

impl RetrofitReport {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: Some(dir.to_owned()),
            ..Default::default()
        }
    }

    /// 将结果写进 `w` 中.
    fn describe_into<W: Write>(&self, w: &mut W) -> io::Result<()> {
        const S4: &str = "    ";

        #[inline]
        fn usize_to_display(u: Option<usize>) -> String {
            match u {
                Some(u) => u.to_string(),
                None => "/".to_string(),
            }
        }

        match &self.dir {
            Some(d) => writeln!(w, "Dataset `{}`:", d.display())?,
            None => writeln!(w, "Dataset `/`:")?,
        }
        writeln!(w, "{S4}Source files: {}", usize_to_display(self.sources))?;
        writeln!(w, "{S4}Master rows: {}", usize_to_display(self.master_rows))?;
        writeln!(w, "{S4}U-Net pairs: {}", usize_to_display(self.unet_rows))?;
        write!(w, "{S4}Pair tables written: {}", self.pair_tables)?;
        Ok(())
    }

    /// 打印运行结果.
    pub fn analyze(&self) {
        utils::sep();
        let mut buf = Vec::with_capacity(256);
        match self.describe_into(&mut buf) {
            Ok(()) => println!("{}", String::from_utf8_lossy(&buf)),
            Err(e) => log::error!("Cannot render report: {e}"),
        }
        utils::sep();
    }
}
