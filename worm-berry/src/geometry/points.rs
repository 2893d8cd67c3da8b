//! 从 `log.csv` 读取标注点.
//!
//! 文件第一行为表头, 至少包含 `p0x, p0y, p0z, ..., p3x, p3y, p3z` 十二列,
//! 列顺序任意, 多余的列被忽略.

use super::{Point, PointSet, POINTS_PER_SET};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// 读取标注点文件的错误.
#[derive(Debug, Error)]
pub enum PointCsvError {
    /// 底层 I/O 错误.
    #[error("cannot read point file: {0}")]
    Io(#[from] std::io::Error),

    /// 表头缺少某列.
    #[error("missing column `{0}`")]
    MissingColumn(String),

    /// 某个字段不是浮点数 (行号从 1 开始, 含表头).
    #[error("bad number at line {line}, column `{column}`")]
    BadNumber {
        /// 行号.
        line: usize,
        /// 列名.
        column: String,
    },
}

const AXES: [char; 3] = ['x', 'y', 'z'];

/// 解析 `text` 中的全部标注. 空行被跳过.
pub fn parse_point_sets(text: &str) -> Result<Vec<PointSet>, PointCsvError> {
    let mut lines = text.lines().enumerate();
    let Some((_, header)) = lines.next() else {
        return Ok(Vec::new());
    };
    let header: Vec<&str> = header.split(',').map(str::trim).collect();

    // 第 i 个点第 a 个轴所在的列
    let mut columns = [[0usize; 3]; POINTS_PER_SET];
    for (i, cols) in columns.iter_mut().enumerate() {
        for (a, col) in cols.iter_mut().enumerate() {
            let name = format!("p{i}{}", AXES[a]);
            *col = header
                .iter()
                .position(|h| *h == name)
                .ok_or(PointCsvError::MissingColumn(name))?;
        }
    }

    let mut ans = Vec::new();
    for (lno, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        let value = |i: usize, a: usize| -> Result<f64, PointCsvError> {
            fields
                .get(columns[i][a])
                .and_then(|f| f.trim().parse::<f64>().ok())
                .ok_or_else(|| PointCsvError::BadNumber {
                    line: lno + 1,
                    column: format!("p{i}{}", AXES[a]),
                })
        };

        let mut points = [Point::new(0.0, 0.0, 0.0); POINTS_PER_SET];
        for (i, p) in points.iter_mut().enumerate() {
            *p = Point::new(value(i, 0)?, value(i, 1)?, value(i, 2)?);
        }
        ans.push(PointSet::new(points));
    }
    Ok(ans)
}

/// 读取 `path` 文件中的全部标注.
pub fn read_point_sets<P: AsRef<Path>>(path: P) -> Result<Vec<PointSet>, PointCsvError> {
    let text = fs::read_to_string(path.as_ref())?;
    parse_point_sets(&text)
}
