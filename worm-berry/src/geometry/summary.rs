//! 神经元对之间的距离统计.

use super::PointSet;
use itertools::{Itertools, MinMaxResult};
use ordered_float::OrderedFloat;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 一组标注中的几种距离.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PairDistances {
    /// ASI 两点之间的距离.
    pub asi: f64,

    /// ASJ 两点之间的距离.
    pub asj: f64,

    /// ASI 中点与 ASJ 中点之间的距离.
    pub midpoint: f64,

    /// `|asi - asj|`.
    pub skew: f64,
}

impl From<&PointSet> for PairDistances {
    fn from(set: &PointSet) -> Self {
        let (a1, a2) = set.asi();
        let (j1, j2) = set.asj();
        let asi = a1.distance(a2);
        let asj = j1.distance(j2);
        Self {
            asi,
            asj,
            midpoint: a1.midpoint(a2).distance(&j1.midpoint(j2)),
            skew: (asi - asj).abs(),
        }
    }
}

/// 均值 / 总体标准差 / 最小值 / 最大值.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Summary {
    /// 均值.
    pub mean: f64,
    /// 总体标准差.
    pub std: f64,
    /// 最小值.
    pub min: f64,
    /// 最大值.
    pub max: f64,
}

impl Summary {
    /// 统计 `data`. 为空时返回 `None`.
    pub fn of<I: IntoIterator<Item = f64>>(data: I) -> Option<Self> {
        let data: Vec<f64> = data.into_iter().collect();
        let (min, max) = match data.iter().copied().map(OrderedFloat).minmax() {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(x) => (x.0, x.0),
            MinMaxResult::MinMax(a, b) => (a.0, b.0),
        };
        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;
        let var = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        Some(Self {
            mean,
            std: var.sqrt(),
            min,
            max,
        })
    }
}

/// 多组标注的距离统计.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DistanceReport {
    /// ASI 距离.
    pub asi: Summary,
    /// ASJ 距离.
    pub asj: Summary,
    /// ASI 与 ASJ 距离之差.
    pub skew: Summary,
    /// ASI 中点到 ASJ 中点的距离.
    pub midpoint: Summary,
}

impl DistanceReport {
    /// 统计 `sets`. 为空时返回 `None`.
    pub fn of(sets: &[PointSet]) -> Option<Self> {
        let d: Vec<PairDistances> = sets.iter().map(PairDistances::from).collect();
        Some(Self {
            asi: Summary::of(d.iter().map(|x| x.asi))?,
            asj: Summary::of(d.iter().map(|x| x.asj))?,
            skew: Summary::of(d.iter().map(|x| x.skew))?,
            midpoint: Summary::of(d.iter().map(|x| x.midpoint))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_summary() {
        assert_eq!(Summary::of([]), None);
        let s = Summary::of([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(s.mean, 5.0);
        assert_eq!(s.std, 2.0);
        assert_eq!((s.min, s.max), (2.0, 9.0));
        let s = Summary::of([3.5]).unwrap();
        assert_eq!((s.mean, s.std, s.min, s.max), (3.5, 0.0, 3.5, 3.5));
    }

    #[test]
    fn test_pair_distances() {
        let set = PointSet::new([
            Point::new(0.0, 0.0, 0.0),
            Point::new(6.0, 8.0, 0.0),
            Point::new(0.0, 0.0, 2.0),
            Point::new(0.0, 0.0, 6.0),
        ]);
        let d = PairDistances::from(&set);
        assert_eq!(d.asi, 10.0);
        assert_eq!(d.asj, 4.0);
        assert_eq!(d.skew, 6.0);
        // (3, 4, 0) 到 (0, 0, 4)
        assert!((d.midpoint - 41f64.sqrt()).abs() < 1e-12);

        let r = DistanceReport::of(&[set, set]).unwrap();
        assert_eq!(r.asi.std, 0.0);
        assert_eq!(r.skew.mean, 6.0);
        assert!(DistanceReport::of(&[]).is_none());
    }
}
