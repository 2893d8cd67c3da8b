//! 感兴趣区域 (ROI).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 日志中记录的原始 ROI 数值: 起点和尺寸.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RawRoi {
    /// 起点 x.
    pub x: i64,
    /// 起点 y.
    pub y: i64,
    /// 起点 z.
    pub z: i64,
    /// 宽, 同时也是高.
    pub width: i64,
    /// 深度.
    pub depth: i64,
}

impl RawRoi {
    /// 从 `x,y,z,w,d` 形式的五个字段解析. 字段两侧空白会被忽略.
    ///
    /// 字段数不为 5 或任一字段不是整数时返回 `None`.
    pub fn parse_fields<'a, I: IntoIterator<Item = &'a str>>(fields: I) -> Option<Self> {
        let mut it = fields.into_iter().map(|f| f.trim().parse::<i64>());
        let mut next = || it.next()?.ok();
        let ans = Self {
            x: next()?,
            y: next()?,
            z: next()?,
            width: next()?,
            depth: next()?,
        };
        if it.next().is_some() {
            return None;
        }
        Some(ans)
    }
}

/// 体素坐标下的轴对齐包围盒.
///
/// 不变量: `xe - xs == ye - ys`, 即横截面是正方形.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Roi {
    /// x 起点 (含).
    pub xs: i64,
    /// y 起点 (含).
    pub ys: i64,
    /// z 起点 (含).
    pub zs: i64,
    /// x 终点 (不含).
    pub xe: i64,
    /// y 终点 (不含).
    pub ye: i64,
    /// z 终点 (不含).
    pub ze: i64,
}

impl Roi {
    /// 由起点和尺寸求包围盒. 终点超出 `i64` 范围时返回 `None`.
    pub fn try_from_raw(raw: RawRoi) -> Option<Self> {
        Some(Self {
            xs: raw.x,
            ys: raw.y,
            zs: raw.z,
            xe: raw.x.checked_add(raw.width)?,
            ye: raw.y.checked_add(raw.width)?,
            ze: raw.z.checked_add(raw.depth)?,
        })
    }

    /// 宽 (同时也是高).
    #[inline]
    pub fn width(&self) -> i64 {
        self.xe - self.xs
    }

    /// 深度.
    #[inline]
    pub fn depth(&self) -> i64 {
        self.ze - self.zs
    }

    /// 以本 ROI 的中心为中心, 裁剪出宽 `width`, 深 `depth` 的新区域.
    ///
    /// 偏移量为 `(原尺寸 - 目标尺寸) / 2`, 向下取整. 目标尺寸比原尺寸大时偏移为负.
    /// 中间结果溢出时返回 `None`.
    pub fn center_crop(&self, width: i64, depth: i64) -> Option<CropBox> {
        let off_xy = self.xe.checked_sub(self.xs)?.checked_sub(width)?.div_euclid(2);
        let off_z = self.ze.checked_sub(self.zs)?.checked_sub(depth)?.div_euclid(2);
        Some(CropBox {
            x: self.xs.checked_add(off_xy)?,
            y: self.ys.checked_add(off_xy)?,
            z: self.zs.checked_add(off_z)?,
            width,
            depth,
        })
    }
}

/// 主数据表中的 ROI 字段.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct CropBox {
    /// `roix`.
    pub x: i64,
    /// `roiy`.
    pub y: i64,
    /// `roiz`.
    pub z: i64,
    /// `roiwh`.
    pub width: i64,
    /// `roid`.
    pub depth: i64,
}

impl CropBox {
    /// 全零 ROI, 用于缺失 ROI 的填充.
    pub const ZERO: CropBox = CropBox {
        x: 0,
        y: 0,
        z: 0,
        width: 0,
        depth: 0,
    };
}
