//! 时间工具模块
//!
//! 进度条百分比与日期展示格式。时间一律使用 `chrono::DateTime<Utc>`，
//! 在浏览器中 `Utc::now()` 由 chrono 的 `wasmbind` 特性提供。

use chrono::{DateTime, Utc};

/// 获取当前时间
#[inline]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// **时间进度百分比**
///
/// 开始前为 0，结束后为 100，中间按已过时间四舍五入；
/// 起止时间相同（或颠倒）时视为已结束。
pub fn progress_percent(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> u8 {
    if now < start {
        return 0;
    }
    if now >= end {
        return 100;
    }
    let total = (end - start).num_milliseconds();
    if total <= 0 {
        return 100;
    }
    let elapsed = (now - start).num_milliseconds();
    ((elapsed as f64 / total as f64) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// 整数比例的百分比，分母为 0 时返回 0
pub fn ratio_percent(part: u32, whole: u32) -> u8 {
    if whole == 0 {
        return 0;
    }
    let pct = (f64::from(part.min(whole)) / f64::from(whole) * 100.0).round();
    pct as u8
}

/// "Mar 1, 2025"
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%b %-d, %Y").to_string()
}

/// "March 1, 2025"
pub fn format_long_date(dt: &DateTime<Utc>) -> String {
    dt.format("%B %-d, %Y").to_string()
}

/// "March 2025"，用于 "Member since"
pub fn format_month_year(dt: &DateTime<Utc>) -> String {
    dt.format("%B %Y").to_string()
}

/// 缺失日期时的展示
pub fn format_optional_date(dt: Option<&DateTime<Utc>>) -> String {
    dt.map(format_date).unwrap_or_else(|| "TBA".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_progress_percent_bounds() {
        let start = at(1, 0);
        let end = at(11, 0);
        assert_eq!(progress_percent(start, end, start - Duration::hours(1)), 0);
        assert_eq!(progress_percent(start, end, start), 0);
        assert_eq!(progress_percent(start, end, at(6, 0)), 50);
        assert_eq!(progress_percent(start, end, end), 100);
        assert_eq!(progress_percent(start, end, end + Duration::days(3)), 100);
    }

    #[test]
    fn test_progress_percent_rounds() {
        let start = at(1, 0);
        let end = at(4, 0);
        // 1/3 -> 33, 2/3 -> 67
        assert_eq!(progress_percent(start, end, at(2, 0)), 33);
        assert_eq!(progress_percent(start, end, at(3, 0)), 67);
    }

    #[test]
    fn test_progress_percent_zero_length() {
        let t = at(5, 0);
        assert_eq!(progress_percent(t, t, t), 100);
        assert_eq!(progress_percent(t, t, t - Duration::minutes(1)), 0);
    }

    #[test]
    fn test_ratio_percent() {
        assert_eq!(ratio_percent(8, 16), 50);
        assert_eq!(ratio_percent(1, 3), 33);
        assert_eq!(ratio_percent(5, 0), 0);
        assert_eq!(ratio_percent(20, 16), 100);
    }

    #[test]
    fn test_formats() {
        let dt = at(1, 9);
        assert_eq!(format_date(&dt), "Mar 1, 2025");
        assert_eq!(format_long_date(&dt), "March 1, 2025");
        assert_eq!(format_month_year(&dt), "March 2025");
        assert_eq!(format_optional_date(None), "TBA");
    }
}
