//! 日志行分类.
//!
//! 每一行 `dataset.log` 都被解释为一个 [`LogEvent`]. 无法识别的行是 [`LogEvent::Other`].

use super::roi::RawRoi;
use crate::consts::marker::*;

/// 一行日志所代表的事件. 所有路径都借用自原始行.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LogEvent<'a> {
    /// `Renaming <original> to <derived>`.
    Rename {
        /// 原始文件路径.
        original: &'a str,
        /// 派生文件路径.
        derived: &'a str,
    },

    /// `Background: <N>`. 数值无法解析时为 `None`.
    Background(Option<i64>),

    /// `Pairing <mask> with <dat> and <original>`.
    Pairing {
        /// 标注掩码文件.
        mask: &'a str,
        /// 标注 dat 文件.
        dat: &'a str,
        /// 原始文件.
        original: &'a str,
    },

    /// `Masking: <dat>`. 旧格式 ROI 的上下文.
    Masking(&'a str),

    /// `Stacking: <path>`. ROI 观测表的上下文.
    Stacking(&'a str),

    /// 新格式 ROI: `<path>,ROI,x,y,z,w,d`. 数值无法解析时 `roi` 为 `None`.
    RoiNew {
        /// 所属文件.
        path: &'a str,
        /// ROI 数值.
        roi: Option<RawRoi>,
    },

    /// 旧格式 ROI: `ROI: x,y,z,w,d`. 数值无法解析时为 `None`.
    RoiOld(Option<RawRoi>),

    /// 其它行.
    Other,
}

/// 取 `line` 中 `marker` 之后的部分.
#[inline]
fn after<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.find(marker).map(|i| &line[i + marker.len()..])
}

impl<'a> LogEvent<'a> {
    /// 解析一行日志. 行尾换行符和空白会被忽略.
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim_end();

        if let Some(rest) = after(line, RENAMING) {
            if let Some((original, derived)) = rest.split_once(TO) {
                return Self::Rename {
                    original: original.trim(),
                    derived: derived.trim(),
                };
            }
        }

        if let Some(rest) = after(line, PAIRING) {
            if let Some((mask, rest)) = rest.split_once(WITH) {
                if let Some((dat, original)) = rest.split_once(AND) {
                    return Self::Pairing {
                        mask: mask.trim(),
                        dat: dat.trim(),
                        original: original.trim(),
                    };
                }
            }
        }

        if let Some(i) = line.find(ROI_NEW) {
            let path = &line[..i];
            let roi = RawRoi::parse_fields(line[i + ROI_NEW.len()..].split(','));
            return Self::RoiNew {
                path: path.trim(),
                roi,
            };
        }

        if let Some(rest) = after(line, ROI_OLD) {
            return Self::RoiOld(RawRoi::parse_fields(rest.split(',')));
        }

        if let Some(dat) = after(line, MASKING) {
            return Self::Masking(dat.trim());
        }

        if let Some(path) = after(line, STACKING) {
            return Self::Stacking(path.trim());
        }

        if line.contains(BACKGROUND) {
            let value = line
                .split_once(':')
                .and_then(|(_, v)| v.trim().parse::<i64>().ok());
            return Self::Background(value);
        }

        Self::Other
    }

    /// 是否为 ROI 事件 (任一格式).
    #[inline]
    pub fn is_roi(&self) -> bool {
        matches!(self, Self::RoiNew { .. } | Self::RoiOld(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rename() {
        assert_eq!(
            LogEvent::parse("Renaming /w/ins-6-mCherry/a.tiff to /d/00001_layered.fits\n"),
            LogEvent::Rename {
                original: "/w/ins-6-mCherry/a.tiff",
                derived: "/d/00001_layered.fits",
            }
        );
        // 缺少 " to " 时无法识别
        assert_eq!(LogEvent::parse("Renaming /w/a.tiff"), LogEvent::Other);
    }

    #[test]
    fn test_parse_background() {
        assert_eq!(LogEvent::parse("Background: 412"), LogEvent::Background(Some(412)));
        assert_eq!(LogEvent::parse("Background: high"), LogEvent::Background(None));
    }

    #[test]
    fn test_parse_pairing() {
        assert_eq!(
            LogEvent::parse("Pairing /m/a_mask.tiff with /m/a_2.dat and /w/a.tiff"),
            LogEvent::Pairing {
                mask: "/m/a_mask.tiff",
                dat: "/m/a_2.dat",
                original: "/w/a.tiff",
            }
        );
    }

    #[test]
    fn test_parse_roi() {
        let raw = RawRoi {
            x: 1,
            y: 2,
            z: 3,
            width: 300,
            depth: 60,
        };
        assert_eq!(
            LogEvent::parse("/w/a.tiff,ROI,1,2,3,300,60"),
            LogEvent::RoiNew {
                path: "/w/a.tiff",
                roi: Some(raw)
            }
        );
        assert_eq!(LogEvent::parse("ROI: 1, 2, 3, 300, 60"), LogEvent::RoiOld(Some(raw)));
        assert_eq!(LogEvent::parse("ROI: 1, 2, three, 300, 60"), LogEvent::RoiOld(None));
        assert!(LogEvent::parse("ROI: 1,2,3,4,5").is_roi());
    }

    #[test]
    fn test_parse_context_and_other() {
        assert_eq!(LogEvent::parse("Masking: /m/a_2.dat"), LogEvent::Masking("/m/a_2.dat"));
        assert_eq!(LogEvent::parse("Stacking: /w/a.tiff"), LogEvent::Stacking("/w/a.tiff"));
        assert_eq!(LogEvent::parse("Finished dataset."), LogEvent::Other);
        assert_eq!(LogEvent::parse(""), LogEvent::Other);
    }
}
