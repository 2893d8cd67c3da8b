//! 齐次坐标下的标注点, 以及每组 4 个点的标注集合.
//!
//! 约定: 第 0, 1 点为 ASI 神经元对, 第 2, 3 点为 ASJ 神经元对.

use ndarray::{Array2, ArrayView2};
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 每组标注的点数: ASI 两侧各一个, ASJ 两侧各一个.
pub const POINTS_PER_SET: usize = 4;

/// 齐次三维坐标.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point {
    /// x.
    pub x: f64,
    /// y.
    pub y: f64,
    /// z.
    pub z: f64,
    /// 齐次分量, 标注点恒为 1.
    pub w: f64,
}

impl Point {
    /// 以 `w = 1` 构建.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    /// 到 `other` 的欧氏距离. 不考虑 `w`.
    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2) + (self.z - other.z).powi(2))
            .sqrt()
    }

    /// 与 `other` 的中点.
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new(
            (self.x + other.x) / 2.0,
            (self.y + other.y) / 2.0,
            (self.z + other.z) / 2.0,
        )
    }
}

/// 一次标注的四个点, 顺序为 ASI-1, ASI-2, ASJ-1, ASJ-2.
///
/// 只读值对象.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointSet([Point; POINTS_PER_SET]);

impl PointSet {
    /// 初始化.
    #[inline]
    pub const fn new(points: [Point; POINTS_PER_SET]) -> Self {
        Self(points)
    }

    /// 全部点.
    #[inline]
    pub fn points(&self) -> &[Point; POINTS_PER_SET] {
        &self.0
    }

    /// ASI 神经元对.
    #[inline]
    pub fn asi(&self) -> (&Point, &Point) {
        (&self.0[0], &self.0[1])
    }

    /// ASJ 神经元对.
    #[inline]
    pub fn asj(&self) -> (&Point, &Point) {
        (&self.0[2], &self.0[3])
    }

    /// 转为 `4 x 4` 矩阵, 每列是一个齐次坐标.
    pub(crate) fn to_columns(&self) -> Array2<f64> {
        Array2::from_shape_fn((4, POINTS_PER_SET), |(r, c)| {
            let p = &self.0[c];
            [p.x, p.y, p.z, p.w][r]
        })
    }

    /// 由 `4 x 4` 列矩阵还原.
    pub(crate) fn from_columns(cols: ArrayView2<f64>) -> Self {
        debug_assert_eq!(cols.shape(), &[4, POINTS_PER_SET]);
        Self(std::array::from_fn(|c| Point {
            x: cols[(0, c)],
            y: cols[(1, c)],
            z: cols[(2, c)],
            w: cols[(3, c)],
        }))
    }
}

impl Index<usize> for PointSet {
    type Output = Point;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// 图像尺寸 `(width, height, depth)`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ImageSize {
    /// 宽.
    pub width: usize,
    /// 高.
    pub height: usize,
    /// 深度 (切片数).
    pub depth: usize,
}
