//! U-Net 训练对 `unet_dataset`.
//!
//! 与日志无关, 只看数据集目录下现有的文件.

use super::error::RetrofitError;
use crate::consts::FITS_EXT;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// 列出 `dir` (不递归) 下的 fits 文件, 文件名含 `layered` 的作为输入,
/// 否则含 `mask` 的作为输出. 两组各自按字典序排序后按下标配对.
///
/// # 错误
///
/// - 读取目录失败时返回 [`RetrofitError::Io`];
/// - 两组文件个数不等时返回 [`RetrofitError::UnetMismatch`].
pub fn unet_pairs(dir: &Path) -> Result<Vec<(String, String)>, RetrofitError> {
    let mut inputs = Vec::new();
    let mut outputs = Vec::new();

    for entry in fs::read_dir(dir).map_err(RetrofitError::io(dir))? {
        let entry = entry.map_err(RetrofitError::io(dir))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(FITS_EXT) {
            continue;
        }
        if name.contains("layered") {
            inputs.push(name);
        } else if name.contains("mask") {
            outputs.push(name);
        }
    }

    if inputs.len() != outputs.len() {
        return Err(RetrofitError::UnetMismatch {
            layered: inputs.len(),
            masks: outputs.len(),
        });
    }

    inputs.sort();
    outputs.sort();
    Ok(inputs.into_iter().zip(outputs).collect())
}

/// 写出无表头的两列 `input,output`.
pub fn write_unet<W: Write>(pairs: &[(String, String)], w: &mut W) -> io::Result<()> {
    for (input, output) in pairs {
        writeln!(w, "{input},{output}")?;
    }
    Ok(())
}
