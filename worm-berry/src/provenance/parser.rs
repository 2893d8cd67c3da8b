//! `dataset.log` 的单趟有限状态解析.
//!
//! 日志里事件之间的关联全靠位置:
//!
//! 1. 紧跟在 `Renaming` 之后的一行若是 `Background`, 则它属于该重命名;
//!   否则该原始文件的背景值为 0. 只看后一行.
//! 2. 旧格式 `ROI: ` 行属于最早一个尚未认领 ROI 的 `Masking: ` 行,
//!   即每个 `Masking: ` 行认领它之后第一个未被认领的 `ROI: ` 行.
//!
//! 这两条都依赖上游生成器从未写明的输出顺序. 顺序一旦改变, 背景值和 ROI
//! 会被静默地错配或丢失.
//!
//! 配对和 ROI 所属关系在扫描结束后才解析, 因此 `Pairing` 行出现在
//! `Renaming` 或 `Masking` 之后也能正确关联.

use super::event::LogEvent;
use super::record::{Provenance, RoiObservation};
use super::roi::{RawRoi, Roi};
use std::collections::{HashMap, VecDeque};

/// 扫描状态.
#[derive(Copy, Clone, Debug)]
enum State {
    /// 无待定上下文.
    Idle,

    /// 上一行是重命名事件, 下标指向对应记录.
    AfterRename(usize),
}

/// ROI 行的所属者, 扫描结束后再解析为原始文件.
#[derive(Copy, Clone, Debug)]
enum RoiOwner<'a> {
    /// 新格式: 行内直接给出的文件.
    Path(&'a str),

    /// 旧格式: 认领它的 `Masking: ` 行中的 dat 文件.
    Dat(&'a str),
}

#[derive(Copy, Clone, Debug)]
struct PendingRoi<'a> {
    line: usize,
    owner: RoiOwner<'a>,
    roi: Option<RawRoi>,
}

#[derive(Copy, Clone, Debug)]
struct PairingEntry<'a> {
    mask: &'a str,
    dat: &'a str,
}

/// `dataset.log` 解析器.
///
/// 逐行调用 [`LogParser::feed`], 最后调用 [`LogParser::finish`] 得到 [`Provenance`].
/// 行号从 1 开始, 仅用于日志输出.
#[derive(Debug)]
pub struct LogParser<'a> {
    state: State,
    line: usize,
    out: Provenance,

    /// 按原始文件索引的配对. 同一原始文件的后续配对覆盖之前的.
    pairings: HashMap<&'a str, PairingEntry<'a>>,
    dat_to_original: HashMap<&'a str, &'a str>,
    mask_to_original: HashMap<&'a str, &'a str>,

    /// 尚未认领 ROI 的 `Masking: ` 行.
    maskings: VecDeque<(usize, &'a str)>,

    /// 最近一个 `Stacking: ` 行的文件.
    stacking: Option<&'a str>,

    rois: Vec<PendingRoi<'a>>,
}

impl Default for LogParser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> LogParser<'a> {
    /// 初始化.
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            line: 0,
            out: Provenance::default(),
            pairings: HashMap::new(),
            dat_to_original: HashMap::new(),
            mask_to_original: HashMap::new(),
            maskings: VecDeque::new(),
            stacking: None,
            rois: Vec::new(),
        }
    }

    /// 读入下一行.
    pub fn feed(&mut self, line: &'a str) {
        self.line += 1;
        let event = LogEvent::parse(line);

        if let State::AfterRename(i) = self.state {
            let background = match event {
                LogEvent::Background(Some(v)) => v,
                LogEvent::Background(None) => {
                    log::warn!("Unparsable background value at line {}: {}", self.line, line.trim_end());
                    0
                }
                _ => 0,
            };
            self.out.records[i].background = background;
            self.state = State::Idle;
        } else if let LogEvent::Background(_) = event {
            log::debug!("Background line {} does not follow a rename", self.line);
        }

        match event {
            LogEvent::Rename { original, derived } => {
                let i = self.out.upsert_rename(original, derived);
                self.state = State::AfterRename(i);
            }
            LogEvent::Pairing {
                mask,
                dat,
                original,
            } => {
                self.pairings.insert(original, PairingEntry { mask, dat });
                self.dat_to_original.insert(dat, original);
                self.mask_to_original.insert(mask, original);
            }
            LogEvent::Masking(dat) => self.maskings.push_back((self.line, dat)),
            LogEvent::Stacking(path) => self.stacking = Some(path),
            LogEvent::RoiNew { path, roi } => {
                if let Some(raw) = roi {
                    self.observe(path, raw);
                }
                self.rois.push(PendingRoi {
                    line: self.line,
                    owner: RoiOwner::Path(path),
                    roi,
                });
            }
            LogEvent::RoiOld(roi) => {
                if let (Some(file), Some(raw)) = (self.stacking, roi) {
                    self.observe(file, raw);
                }
                match self.maskings.pop_front() {
                    Some((_, dat)) => self.rois.push(PendingRoi {
                        line: self.line,
                        owner: RoiOwner::Dat(dat),
                        roi,
                    }),
                    None => log::debug!("ROI line {} is not claimed by any masking", self.line),
                }
            }
            LogEvent::Background(_) | LogEvent::Other => {}
        }
    }

    fn observe(&mut self, file: &str, roi: RawRoi) {
        self.out.observations.push(RoiObservation {
            file: file.to_string(),
            roi,
        });
    }

    /// 结束扫描, 关联配对和 ROI.
    pub fn finish(mut self) -> Provenance {
        for (original, p) in self.pairings.iter() {
            match self.out.get_mut(original) {
                Some(rec) => rec.pair(p.mask, p.dat),
                None => log::debug!("Pairing for {original} has no matching rename"),
            }
        }

        for (line, dat) in self.maskings.iter() {
            log::debug!("Masking line {line} ({dat}) never got a ROI");
        }

        for pending in self.rois.iter() {
            let Some(roi) = pending.roi.and_then(Roi::try_from_raw) else {
                log::warn!("Couldn't parse ROI at line {}", pending.line);
                continue;
            };
            let original = match pending.owner {
                RoiOwner::Path(path) => {
                    if self.out.index.contains_key(path) {
                        Some(path)
                    } else {
                        self.mask_to_original
                            .get(path)
                            .or_else(|| self.dat_to_original.get(path))
                            .copied()
                    }
                }
                RoiOwner::Dat(dat) => self.dat_to_original.get(dat).copied(),
            };
            let Some(original) = original else {
                match pending.owner {
                    RoiOwner::Path(path) => {
                        log::warn!("Couldn't find source for ROI line {}: {path}", pending.line)
                    }
                    RoiOwner::Dat(dat) => {
                        log::warn!("Couldn't find ROI for line: Masking: {dat}")
                    }
                }
                continue;
            };
            match self.out.get_mut(original) {
                Some(rec) => rec.roi = Some(roi),
                None => log::debug!("ROI at line {} belongs to unrenamed {original}", pending.line),
            }
        }

        self.out
    }
}

/// 解析整个日志文本.
pub fn parse_log(text: &str) -> Provenance {
    let mut parser = LogParser::new();
    for line in text.lines() {
        parser.feed(line);
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renames(n: usize) -> String {
        (0..n)
            .map(|i| format!("Renaming /w/ins-6-mCherry/s{i}.tiff to /d/{i:05}_layered.fits\n"))
            .collect()
    }

    #[test]
    fn test_rename_completeness() {
        let p = parse_log(&renames(7));
        assert_eq!(p.len(), 7);
        assert!(p.records().iter().all(|r| r.background == 0));
        assert_eq!(p.records()[3].original, "/w/ins-6-mCherry/s3.tiff");
        assert_eq!(p.records()[3].new_mask, "/d/00003_mask.fits");
        assert_eq!(
            p.records()[3].fits_source.as_deref(),
            Some("/w/mcherry_fits/s3.fits")
        );
    }

    #[test]
    fn test_background_lookahead() {
        let log = "\
Renaming /w/a.tiff to /d/a_layered.fits
Background: 380
Renaming /w/b.tiff to /d/b_layered.fits
Something else
Background: 999
Renaming /w/c.tiff to /d/c_layered.fits
Background: oops
Renaming /w/d.tiff to /d/d_layered.fits";
        let p = parse_log(log);
        let bg = |k: &str| p.get(k).unwrap().background;
        assert_eq!(bg("/w/a.tiff"), 380);
        assert_eq!(bg("/w/b.tiff"), 0);
        assert_eq!(bg("/w/c.tiff"), 0);
        assert_eq!(bg("/w/d.tiff"), 0);
    }

    #[test]
    fn test_duplicate_rename_keeps_first_position() {
        let log = "\
Renaming /w/a.tiff to /d/a_layered.fits
Renaming /w/b.tiff to /d/b_layered.fits
Renaming /w/a.tiff to /d/a2_layered.fits
Background: 5";
        let p = parse_log(log);
        assert_eq!(p.len(), 2);
        assert_eq!(p.records()[0].derived, "/d/a2_layered.fits");
        assert_eq!(p.records()[0].background, 5);
        assert_eq!(p.renames().len(), 3);
    }

    #[test]
    fn test_pairing_before_and_after_rename() {
        let log = "\
Pairing /m/a_mask.tiff with /m/a_2.dat and /w/a.tiff
Renaming /w/a.tiff to /d/a_layered.fits
Renaming /w/b.tiff to /d/b_layered.fits
Pairing /m/b_mask.tiff with /m/b_2.dat and /w/b.tiff
Pairing /m/z_mask.tiff with /m/z_2.dat and /w/z.tiff";
        let p = parse_log(log);
        assert_eq!(p.len(), 2);
        let a = p.get("/w/a.tiff").unwrap();
        assert_eq!(a.mask.as_deref(), Some("/m/a_mask.tiff"));
        assert_eq!(a.log.as_deref(), Some("/m/a_2.log"));
        let b = p.get("/w/b.tiff").unwrap();
        assert_eq!(b.dat.as_deref(), Some("/m/b_2.dat"));
        assert!(p.get("/w/z.tiff").is_none());
    }

    #[test]
    fn test_roi_format_equivalence() {
        let old = "\
Renaming /w/a.tiff to /d/a_layered.fits
Pairing /m/a_mask.tiff with /m/a_2.dat and /w/a.tiff
Masking: /m/a_2.dat
ROI: 120, 80, 4, 300, 61";
        let new = "\
Renaming /w/a.tiff to /d/a_layered.fits
Pairing /m/a_mask.tiff with /m/a_2.dat and /w/a.tiff
/w/a.tiff,ROI,120,80,4,300,61";
        let expect = Roi {
            xs: 120,
            ys: 80,
            zs: 4,
            xe: 420,
            ye: 380,
            ze: 65,
        };
        let a = parse_log(old).get("/w/a.tiff").unwrap().roi;
        let b = parse_log(new).get("/w/a.tiff").unwrap().roi;
        assert_eq!(a, Some(expect));
        assert_eq!(a, b);
    }

    #[test]
    fn test_new_roi_by_mask_path() {
        let log = "\
Renaming /w/a.tiff to /d/a_layered.fits
Pairing /m/a_mask.tiff with /m/a_2.dat and /w/a.tiff
/m/a_mask.tiff,ROI,1,2,3,10,5
/nowhere.tiff,ROI,1,2,3,10,5";
        let p = parse_log(log);
        assert_eq!(p.get("/w/a.tiff").unwrap().roi.unwrap().xe, 11);
    }

    #[test]
    fn test_old_roi_first_unclaimed() {
        // m1 认领 r1, 多余的 r2 不归属任何 Masking, m2 认领 r3.
        let log = "\
Renaming /w/a.tiff to /d/a_layered.fits
Renaming /w/b.tiff to /d/b_layered.fits
Pairing /m/a_mask.tiff with /m/a_2.dat and /w/a.tiff
Pairing /m/b_mask.tiff with /m/b_2.dat and /w/b.tiff
Masking: /m/a_2.dat
ROI: 1,1,1,10,5
ROI: 2,2,2,10,5
Masking: /m/b_2.dat
ROI: 3,3,3,10,5";
        let p = parse_log(log);
        assert_eq!(p.get("/w/a.tiff").unwrap().roi.unwrap().xs, 1);
        assert_eq!(p.get("/w/b.tiff").unwrap().roi.unwrap().xs, 3);

        // 两个 Masking 连续出现, 之后的 ROI 依次被认领.
        let log = "\
Renaming /w/a.tiff to /d/a_layered.fits
Renaming /w/b.tiff to /d/b_layered.fits
Pairing /m/a_mask.tiff with /m/a_2.dat and /w/a.tiff
Pairing /m/b_mask.tiff with /m/b_2.dat and /w/b.tiff
Masking: /m/a_2.dat
Masking: /m/b_2.dat
ROI: 1,1,1,10,5
ROI: 2,2,2,10,5";
        let p = parse_log(log);
        assert_eq!(p.get("/w/a.tiff").unwrap().roi.unwrap().xs, 1);
        assert_eq!(p.get("/w/b.tiff").unwrap().roi.unwrap().xs, 2);
    }

    #[test]
    fn test_bad_roi_is_consumed() {
        let _ = simple_logger::SimpleLogger::new().init();
        let log = "\
Renaming /w/a.tiff to /d/a_layered.fits
Pairing /m/a_mask.tiff with /m/a_2.dat and /w/a.tiff
Masking: /m/a_2.dat
ROI: 1,x,1,10,5
ROI: 2,2,2,10,5";
        let p = parse_log(log);
        assert_eq!(p.get("/w/a.tiff").unwrap().roi, None);
    }

    #[test]
    fn test_roi_overflow_is_skipped() {
        let log = "\
Renaming /w/a.tiff to /d/a_layered.fits
Renaming /w/b.tiff to /d/b_layered.fits
/w/a.tiff,ROI,9223372036854775807,0,0,1,1
/w/b.tiff,ROI,1,2,3,10,5";
        let p = parse_log(log);
        assert_eq!(p.get("/w/a.tiff").unwrap().roi, None);
        assert_eq!(p.get("/w/b.tiff").unwrap().roi.unwrap().xe, 11);
    }

    #[test]
    fn test_roi_observations() {
        let log = "\
ROI: 9,9,9,9,9
Stacking: /w/a.tiff
ROI: 1, 2, 3, 300, 51
/w/b.tiff,ROI,4,5,6,200,41";
        let p = parse_log(log);
        let obs = p.roi_observations();
        assert_eq!(obs.len(), 2);
        assert_eq!(obs[0].file, "/w/a.tiff");
        assert_eq!(obs[0].roi.width, 300);
        assert_eq!(obs[1].file, "/w/b.tiff");
        assert_eq!(obs[1].roi.z, 6);
    }
}
