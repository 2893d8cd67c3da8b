#![warn(missing_docs)] // <= 合适时移除它.
// #![warn(clippy::missing_docs_in_private_items)]  // <= too strict.

//! 核心库. 为线虫 (C. elegans) 3D FITS 数据集提供来源重建和神经元标注坐标归一化.
//!
//! 该 crate 仅提供 `safe` 接口.
//!
//! # 注意
//!
//! 1. `dataset.log` 由上游数据集生成工具写出, 格式没有文档.
//!   本 crate 只识别已知的两种 ROI 写法, 其它行一律忽略.
//! 2. 单条记录层面的问题只记录日志 (通过 `log` 门面) 并跳过;
//!   只有会导致训练数据被错误标注的不一致才会作为错误返回.
//!
//! # 开发计划
//!
//! ### 日志事件分类 ✅
//!
//! `Renaming`, `Background`, `Pairing`, `Masking`, `Stacking`,
//! 以及新旧两种 ROI 写法.
//!
//! 实现位于 `worm-berry/src/provenance/event.rs`.
//!
//! ### 单趟有限状态解析 ✅
//!
//! 背景值只看重命名的后一行; 旧格式 ROI 按先到先得的方式被 `Masking` 认领.
//!
//! 实现位于 `worm-berry/src/provenance/parser.rs`.
//!
//! ### 增广文件回溯 ✅
//!
//! 派生文件不存在时, 到其目录下搜索同前缀的 layered/掩码文件并按排序配对.
//!
//! 实现位于 `worm-berry/src/provenance/augment.rs`.
//!
//! ### 主数据表 / U-Net 训练对 / 对照表 ✅
//!
//! 两种列布局 (有无 `fitsmask`) 和两种缺失 ROI 策略 (补零或中止) 均可配置.
//!
//! 实现位于 `worm-berry/src/provenance/{table, unet, pairs}.rs`.
//!
//! ### 标注坐标归一化 ✅
//!
//! 体素坐标 -> `[-1, 1]` 立方体, 以及逆变换.
//!
//! 实现位于 `worm-berry/src/geometry`.
//!
//! ### 神经元对距离统计 ✅
//!
//! ASI/ASJ 距离, 中点距离, 偏差的均值/标准差/极值.
//!
//! 实现位于 `worm-berry/src/geometry/summary.rs`.

pub mod consts;

pub mod dataset;
pub mod geometry;
pub mod prelude;
pub mod provenance;
