//! 原始文件与派生文件的对照表, 以及原始 ROI 观测表.

use super::paths::{replace_fits_dir, swap_tiff_ext};
use super::record::Provenance;
use crate::consts::FITS_REPLACEMENTS;
use std::io::{self, Write};

/// 写出 `original,derived` 对照表, 每个重命名事件一行.
pub fn write_pairs<W: Write>(prov: &Provenance, w: &mut W) -> io::Result<()> {
    writeln!(w, "original,derived")?;
    for (original, derived) in prov.renames() {
        writeln!(w, "{original},{derived}")?;
    }
    Ok(())
}

/// 写出原始文件换成 fits 路径后的对照表.
///
/// 替换表不命中的原始文件只交换扩展名.
pub fn write_pairs_fits<W: Write>(prov: &Provenance, w: &mut W) -> io::Result<()> {
    writeln!(w, "original,derived")?;
    for (original, derived) in prov.renames() {
        let fits = replace_fits_dir(original, &FITS_REPLACEMENTS);
        let fits = swap_tiff_ext(fits.as_deref().unwrap_or(original));
        writeln!(w, "{fits},{derived}")?;
    }
    Ok(())
}

/// 写出 `filename,x,y,z,xydim,zdim` 原始 ROI 观测表.
pub fn write_rois<W: Write>(prov: &Provenance, w: &mut W) -> io::Result<()> {
    writeln!(w, "filename,x,y,z,xydim,zdim")?;
    for obs in prov.roi_observations() {
        let r = &obs.roi;
        writeln!(
            w,
            "{},{},{},{},{},{}",
            obs.file, r.x, r.y, r.z, r.width, r.depth
        )?;
    }
    Ok(())
}
