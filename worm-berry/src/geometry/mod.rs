//! 神经元标注点的坐标归一化.
//!
//! 标注点以体素坐标给出 (x, y 单位为像素, z 单位为切片序号).
//! 渲染与比较时使用的坐标系是边长为 2 的中心立方体, 每个轴的范围为 `[-1, 1]`.
//! 归一化先按 `2 / width` 统一缩放三个轴, 再平移 `(-1, -1, -1)`:
//!
//! `(0, 0, 0)` -> `(-1, -1, -1)`, `(width, width, width)` -> `(1, 1, 1)`.
//!
//! 因为三个轴使用同一缩放系数, 同宽度的图像之间的欧氏距离可以直接比较,
//! 与各自体素的绝对尺寸无关.

mod point;
pub mod points;
pub mod summary;

pub use point::{ImageSize, Point, PointSet, POINTS_PER_SET};

use ndarray::{array, Array2};
use thiserror::Error;

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
    }
}

/// 归一化的前置条件错误.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum NormalizeError {
    /// 图像横截面不是正方形.
    #[error("image cross-section must be square, got {width}x{height}")]
    NonSquare {
        /// 宽.
        width: usize,
        /// 高.
        height: usize,
    },

    /// 图像宽为 0.
    #[error("image width must be positive")]
    ZeroWidth,
}

/// 齐次缩放矩阵 (列向量约定).
pub fn scale_matrix(sx: f64, sy: f64, sz: f64) -> Array2<f64> {
    array![
        [sx, 0.0, 0.0, 0.0],
        [0.0, sy, 0.0, 0.0],
        [0.0, 0.0, sz, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// 齐次平移矩阵 (列向量约定).
pub fn translate_matrix(tx: f64, ty: f64, tz: f64) -> Array2<f64> {
    array![
        [1.0, 0.0, 0.0, tx],
        [0.0, 1.0, 0.0, ty],
        [0.0, 0.0, 1.0, tz],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// 检查前置条件, 返回正方形横截面的边长.
fn square_width(size: ImageSize) -> Result<f64, NormalizeError> {
    if size.width != size.height {
        return Err(NormalizeError::NonSquare {
            width: size.width,
            height: size.height,
        });
    }
    if size.width == 0 {
        return Err(NormalizeError::ZeroWidth);
    }
    Ok(size.width as f64)
}

/// 体素坐标 -> `[-1, 1]` 立方体坐标的变换矩阵: 先缩放, 后平移.
pub fn normalize_matrix(size: ImageSize) -> Result<Array2<f64>, NormalizeError> {
    let s = 2.0 / square_width(size)?;
    Ok(translate_matrix(-1.0, -1.0, -1.0).dot(&scale_matrix(s, s, s)))
}

/// [`normalize_matrix`] 的逆: 先平移 `(1, 1, 1)`, 后缩放 `width / 2`.
pub fn denormalize_matrix(size: ImageSize) -> Result<Array2<f64>, NormalizeError> {
    let s = square_width(size)? / 2.0;
    Ok(scale_matrix(s, s, s).dot(&translate_matrix(1.0, 1.0, 1.0)))
}

/// 将 `mat` 作用于 `points` 的每个点 (齐次列向量), 顺序不变.
fn apply(mat: &Array2<f64>, points: &PointSet) -> PointSet {
    let cols = mat.dot(&points.to_columns());
    PointSet::from_columns(cols.view())
}

/// 将体素坐标下的 `points` 归一化到 `[-1, 1]` 立方体.
///
/// # 错误
///
/// `size.width != size.height` 时返回 [`NormalizeError::NonSquare`],
/// 宽为 0 时返回 [`NormalizeError::ZeroWidth`]. `size.depth` 不参与计算.
pub fn normalize(points: &PointSet, size: ImageSize) -> Result<PointSet, NormalizeError> {
    Ok(apply(&normalize_matrix(size)?, points))
}

/// [`normalize`] 的逆变换.
pub fn denormalize(points: &PointSet, size: ImageSize) -> Result<PointSet, NormalizeError> {
    Ok(apply(&denormalize_matrix(size)?, points))
}

/// 对多组标注点逐一归一化. 前置条件只检查一次.
pub fn normalize_all(sets: &[PointSet], size: ImageSize) -> Result<Vec<PointSet>, NormalizeError> {
    let mat = normalize_matrix(size)?;
    Ok(sets.iter().map(|p| apply(&mat, p)).collect())
}

/// 借助 `rayon`, 并行地对多组标注点归一化. 结果顺序与输入一致.
#[cfg(feature = "rayon")]
pub fn par_normalize_all(
    sets: &[PointSet],
    size: ImageSize,
) -> Result<Vec<PointSet>, NormalizeError> {
    let mat = normalize_matrix(size)?;
    Ok(sets.par_iter().map(|p| apply(&mat, p)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: ImageSize = ImageSize {
        width: 128,
        height: 128,
        depth: 16,
    };

    fn float_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn point_eq(p: &Point, q: &Point) -> bool {
        float_eq(p.x, q.x) && float_eq(p.y, q.y) && float_eq(p.z, q.z) && float_eq(p.w, q.w)
    }

    fn set(coords: [(f64, f64, f64); 4]) -> PointSet {
        PointSet::new(coords.map(|(x, y, z)| Point::new(x, y, z)))
    }

    #[test]
    fn test_boundary_mapping() {
        let input = set([
            (0.0, 0.0, 0.0),
            (128.0, 128.0, 128.0),
            (64.0, 64.0, 64.0),
            (32.0, 96.0, 8.0),
        ]);
        let out = normalize(&input, SIZE).unwrap();
        assert!(point_eq(&out[0], &Point::new(-1.0, -1.0, -1.0)));
        assert!(point_eq(&out[1], &Point::new(1.0, 1.0, 1.0)));
        assert!(point_eq(&out[2], &Point::new(0.0, 0.0, 0.0)));
        assert!(point_eq(&out[3], &Point::new(-0.5, 0.5, -0.875)));
        // 输入不变
        assert!(point_eq(&input[1], &Point::new(128.0, 128.0, 128.0)));
    }

    #[test]
    fn test_non_square_rejected() {
        let size = ImageSize {
            width: 128,
            height: 64,
            depth: 16,
        };
        let input = set([(1.0, 2.0, 3.0); 4]);
        assert_eq!(
            normalize(&input, size),
            Err(NormalizeError::NonSquare {
                width: 128,
                height: 64
            })
        );
        assert!(denormalize(&input, size).is_err());
        assert!(normalize_all(&[input], size).is_err());

        let zero = ImageSize {
            width: 0,
            height: 0,
            depth: 1,
        };
        assert_eq!(normalize(&input, zero), Err(NormalizeError::ZeroWidth));
    }

    #[test]
    fn test_inverse_round_trip() {
        let input = set([
            (10.5, 20.25, 3.0),
            (100.0, 7.0, 15.0),
            (0.0, 127.0, 1.0),
            (64.0, 1.0, 12.0),
        ]);
        let n = normalize(&input, SIZE).unwrap();
        let back = denormalize(&n, SIZE).unwrap();
        let again = normalize(&back, SIZE).unwrap();
        for i in 0..POINTS_PER_SET {
            assert!(point_eq(&back[i], &input[i]));
            assert!(point_eq(&again[i], &n[i]));
        }
    }

    #[test]
    fn test_scale_consistent_distances() {
        // 同宽度的两幅图像, 平移后的同一形状距离不变.
        let a = set([(0.0, 0.0, 0.0), (3.0, 4.0, 0.0), (1.0, 1.0, 1.0), (1.0, 1.0, 2.0)]);
        let b = set([(50.0, 50.0, 5.0), (53.0, 54.0, 5.0), (51.0, 51.0, 6.0), (51.0, 51.0, 7.0)]);
        let na = normalize(&a, SIZE).unwrap();
        let nb = normalize(&b, SIZE).unwrap();
        assert!(float_eq(na[0].distance(&na[1]), nb[0].distance(&nb[1])));
        assert!(float_eq(na[0].distance(&na[1]), 5.0 * 2.0 / 128.0));
    }

    #[test]
    fn test_normalize_all_keeps_order() {
        let sets: Vec<_> = (0..5)
            .map(|i| set([(i as f64, 0.0, 0.0); 4]))
            .collect();
        let out = normalize_all(&sets, SIZE).unwrap();
        for (i, s) in out.iter().enumerate() {
            assert!(float_eq(s[0].x, i as f64 * 2.0 / 128.0 - 1.0));
        }
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_par_normalize_all() {
        let sets: Vec<_> = (0..64)
            .map(|i| set([(i as f64, 1.0, 2.0); 4]))
            .collect();
        assert_eq!(
            par_normalize_all(&sets, SIZE).unwrap(),
            normalize_all(&sets, SIZE).unwrap()
        );
    }
}
