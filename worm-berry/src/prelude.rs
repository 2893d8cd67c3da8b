//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::consts::{DEFAULT_ROI_DEPTH, DEFAULT_ROI_WIDTH};

pub use crate::dataset::{home_dataset_dir, home_dataset_dir_with};

pub use crate::geometry::summary::{DistanceReport, PairDistances, Summary};
pub use crate::geometry::{
    denormalize, normalize, normalize_all, ImageSize, NormalizeError, Point, PointSet,
};

#[cfg(feature = "rayon")]
pub use crate::geometry::par_normalize_all;

pub use crate::provenance::{
    parse_log, retrofit, retrofit_unet, MasterLayout, Provenance, RetrofitConfig, RetrofitError,
    Roi, RoiPolicy, SourceRecord,
};
