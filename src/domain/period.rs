// ==========================================
// ANS 合规报告 - 报告期间
// ==========================================
// 一个报告期间 = 一个自然月 (year, month)
// ==========================================

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

// ==========================================
// ReportPeriod - 报告期间
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub year: i32,  // 1-9999
    pub month: u32, // 1-12
}

impl ReportPeriod {
    /// 构造报告期间,越界返回 None
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    /// 当月第一天
    pub fn first_day(&self) -> NaiveDate {
        // year/month 已在构造时校验
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// 当月自然日天数
    pub fn days_in_month(&self) -> u32 {
        let next = self.next();
        let next_first = NaiveDate::from_ymd_opt(next.year, next.month, 1);
        match next_first {
            Some(d) => d.pred_opt().map(|last| last.day()).unwrap_or(31),
            None => 31,
        }
    }

    /// 当月墙钟小时数 = 天数 × 24
    pub fn calendar_hours(&self) -> u64 {
        u64::from(self.days_in_month()) * 24
    }

    /// 下一个月 (9999-12 的下一个月 year 会越过 MAX_YEAR,仅用于日历计算)
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// 往前推 n 个月,越过公元 1 年返回 None
    pub fn months_before(&self, n: u32) -> Option<Self> {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 - i64::from(n);
        if index < 0 {
            return None;
        }
        let year = (index / 12) as i32;
        let month = (index % 12) as u32 + 1;
        Self::new(year, month)
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(ReportPeriod::new(2025, 0).is_none());
        assert!(ReportPeriod::new(2025, 13).is_none());
        assert!(ReportPeriod::new(0, 5).is_none());
        assert!(ReportPeriod::new(10000, 5).is_none());
        assert!(ReportPeriod::new(9999, 12).is_some());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(ReportPeriod::new(2025, 9).unwrap().days_in_month(), 30);
        assert_eq!(ReportPeriod::new(2025, 2).unwrap().days_in_month(), 28);
        assert_eq!(ReportPeriod::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(ReportPeriod::new(9999, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn test_calendar_hours() {
        assert_eq!(ReportPeriod::new(2025, 9).unwrap().calendar_hours(), 720);
        assert_eq!(ReportPeriod::new(2025, 10).unwrap().calendar_hours(), 744);
    }

    #[test]
    fn test_months_before_crosses_year() {
        let p = ReportPeriod::new(2025, 2).unwrap();
        assert_eq!(p.months_before(3), ReportPeriod::new(2024, 11));
        assert_eq!(p.months_before(0), Some(p));
        assert_eq!(ReportPeriod::new(1, 1).unwrap().months_before(1), None);
    }
}
