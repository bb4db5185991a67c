//! Chinese lunisolar almanac.
//!
//! Supplies the Normal-mode subtitle: lunar month and day, weekday, and the
//! solar term when one falls today (`六月十五 週四 夏至`).
//!
//! The conversion is computed from low-precision solar and lunar theory
//! (Meeus): apparent solar longitude good to ~0.01 degrees and new-moon
//! instants good to a couple of minutes. Dynamical-time minus UT is under
//! two minutes in the supported range and is ignored; all day boundaries
//! here are civil midnights at the calendar's reference meridian (UTC+8),
//! so the worst-case error is orders of magnitude below a day.

use chrono::{Datelike, NaiveDate};

/// Julian day of the Unix epoch (1970-01-01 00:00 UTC).
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
/// Days from 0001-01-01 (CE day 1) to 1970-01-01, chrono's `num_days_from_ce` scale.
const UNIX_EPOCH_DAYS_CE: i64 = 719_163;
/// J2000.0 epoch.
const J2000: f64 = 2_451_545.0;
/// Mean length of the synodic month in days.
const SYNODIC_MONTH: f64 = 29.530_588_861;
/// Epoch of the k = 0 new moon (2000 Jan 6), Meeus ch. 49.
const NEW_MOON_EPOCH: f64 = 2_451_550.097_66;
/// Calendar reference meridian, expressed in days east of Greenwich.
const CST_DAY_FRACTION: f64 = 8.0 / 24.0;

/// Lunar month names; index 10 and 11 carry the traditional winter names.
const MONTH_NAMES: [&str; 12] = [
    "正月", "二月", "三月", "四月", "五月", "六月",
    "七月", "八月", "九月", "十月", "冬月", "臘月",
];

/// Lunar day names, 初一 through 三十.
const DAY_NAMES: [&str; 30] = [
    "初一", "初二", "初三", "初四", "初五", "初六", "初七", "初八", "初九", "初十",
    "十一", "十二", "十三", "十四", "十五", "十六", "十七", "十八", "十九", "二十",
    "廿一", "廿二", "廿三", "廿四", "廿五", "廿六", "廿七", "廿八", "廿九", "三十",
];

/// Weekday labels, Monday first.
const WEEKDAYS: [&str; 7] = ["週一", "週二", "週三", "週四", "週五", "週六", "週日"];

/// The 24 solar terms indexed by (ecliptic longitude / 15°), so index 0 is
/// the spring equinox and index 21 is 立春 at 315°.
const SOLAR_TERMS: [&str; 24] = [
    "春分", "清明", "穀雨", "立夏", "小滿", "芒種",
    "夏至", "小暑", "大暑", "立秋", "處暑", "白露",
    "秋分", "寒露", "霜降", "立冬", "小雪", "大雪",
    "冬至", "小寒", "大寒", "立春", "雨水", "驚蟄",
];

/// A date on the Chinese lunisolar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarDate {
    /// Month number 1..=12 (1 = 正月).
    pub month: u32,
    /// Day of the lunar month, 1..=30.
    pub day: u32,
    /// Whether this is the intercalary (leap) month of its number.
    pub leap: bool,
}

impl LunarDate {
    /// Render as `六月十五`, or `閏六月初一` for a leap month.
    pub fn label(&self) -> String {
        let month = MONTH_NAMES
            .get(self.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("正月");
        let day = DAY_NAMES
            .get(self.day.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("初一");
        if self.leap {
            format!("閏{}{}", month, day)
        } else {
            format!("{}{}", month, day)
        }
    }
}

/// Julian day at civil midnight (UTC+8) of `date`.
fn jd_at_midnight(date: NaiveDate) -> f64 {
    let days = i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_CE;
    UNIX_EPOCH_JD + days as f64 - CST_DAY_FRACTION
}

/// Civil date (UTC+8) containing the instant `jd`.
fn civil_date_of(jd: f64) -> NaiveDate {
    // The nanosecond-scale nudge keeps instants that are exactly on a civil
    // midnight from flooring into the previous day through float rounding.
    let days = (jd - UNIX_EPOCH_JD + CST_DAY_FRACTION + 1e-9).floor() as i64;
    NaiveDate::from_num_days_from_ce_opt((days + UNIX_EPOCH_DAYS_CE) as i32)
        .unwrap_or_default()
}

/// Apparent ecliptic longitude of the sun at `jd`, in degrees `[0, 360)`.
fn sun_longitude(jd: f64) -> f64 {
    let t = (jd - J2000) / 36_525.0;
    let l0 = 280.46646 + 36_000.76983 * t + 0.000_303_2 * t * t;
    let m = (357.52911 + 35_999.05029 * t - 0.000_153_7 * t * t).to_radians();
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();
    let omega = (125.04 - 1_934.136 * t).to_radians();
    (l0 + c - 0.005_69 - 0.004_78 * omega.sin()).rem_euclid(360.0)
}

/// Instant of the k-th mean new moon after the year 2000 epoch, corrected
/// by the principal periodic terms (Meeus ch. 49, truncated).
fn new_moon_jd(k: f64) -> f64 {
    let t = k / 1_236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let mean = NEW_MOON_EPOCH + SYNODIC_MONTH * k + 0.000_154_37 * t2
        - 0.000_000_150 * t3
        + 0.000_000_000_73 * t4;

    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;
    let m = (2.5534 + 29.105_356_70 * k - 0.000_001_4 * t2 - 0.000_000_11 * t3).to_radians();
    let mp = (201.5643 + 385.816_935_28 * k + 0.010_758_2 * t2 + 0.000_012_38 * t3
        - 0.000_000_058 * t4)
        .to_radians();
    let f = (160.7108 + 390.670_502_84 * k - 0.001_611_8 * t2 - 0.000_002_27 * t3
        + 0.000_000_011 * t4)
        .to_radians();
    let omega = (124.7746 - 1.563_755_88 * k + 0.002_067_2 * t2 + 0.000_002_15 * t3).to_radians();

    let correction = -0.407_20 * mp.sin()
        + 0.172_41 * e * m.sin()
        + 0.016_08 * (2.0 * mp).sin()
        + 0.010_39 * (2.0 * f).sin()
        + 0.007_39 * e * (mp - m).sin()
        - 0.005_14 * e * (mp + m).sin()
        + 0.002_08 * e * e * (2.0 * m).sin()
        - 0.001_11 * (mp - 2.0 * f).sin()
        - 0.000_57 * (mp + 2.0 * f).sin()
        + 0.000_56 * e * (2.0 * mp + m).sin()
        - 0.000_42 * (3.0 * mp).sin()
        + 0.000_42 * e * (m + 2.0 * f).sin()
        + 0.000_38 * e * (m - 2.0 * f).sin()
        - 0.000_24 * e * (2.0 * mp - m).sin()
        - 0.000_17 * omega.sin();

    mean + correction
}

/// Civil date of the k-th new moon.
fn new_moon_date(k: f64) -> NaiveDate {
    civil_date_of(new_moon_jd(k))
}

/// Index of the latest new moon whose civil date is on or before `date`.
fn new_moon_on_or_before(date: NaiveDate) -> f64 {
    let hint = jd_at_midnight(date) + 1.0;
    let mut k = ((hint - NEW_MOON_EPOCH) / SYNODIC_MONTH).floor();
    while new_moon_date(k) > date {
        k -= 1.0;
    }
    while new_moon_date(k + 1.0) <= date {
        k += 1.0;
    }
    k
}

/// Difference `a - b` folded into `(-180, 180]`.
fn signed_delta(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Instant the sun reaches longitude 270° in December of `year`.
fn december_solstice_jd(year: i32) -> f64 {
    let mut lo = NaiveDate::from_ymd_opt(year, 12, 14)
        .map(jd_at_midnight)
        .unwrap_or(J2000);
    let mut hi = lo + 14.0;
    for _ in 0..64 {
        let mid = (lo + hi) / 2.0;
        if signed_delta(sun_longitude(mid), 270.0) < 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    (lo + hi) / 2.0
}

/// Whether the sun crosses a multiple of `step` degrees in `[jd0, jd1)`.
fn crosses_multiple_of(step: f64, jd0: f64, jd1: f64) -> bool {
    let l0 = sun_longitude(jd0);
    let advance = (sun_longitude(jd1) - l0).rem_euclid(360.0);
    ((l0 + advance) / step).floor() > (l0 / step).floor()
}

/// Whether the lunar month starting at new moon `k` contains a major solar
/// term (a multiple of 30°). Months lacking one are intercalary candidates.
fn month_has_major_term(k: f64) -> bool {
    let jd0 = jd_at_midnight(new_moon_date(k));
    let jd1 = jd_at_midnight(new_moon_date(k + 1.0));
    crosses_multiple_of(30.0, jd0, jd1)
}

/// Convert a civil date (UTC+8) to the Chinese lunisolar calendar.
///
/// Months are anchored to the lunar month containing the December solstice,
/// which is always month 11. When the solstice-to-solstice span holds 13
/// lunations, the first month after month 11 without a major solar term is
/// the leap month; it repeats the number of the month before it.
pub fn lunar_date(date: NaiveDate) -> LunarDate {
    let k = new_moon_on_or_before(date);
    let day = (date - new_moon_date(k)).num_days() as u32 + 1;

    // Most recent December solstice on or before `date`.
    let mut solstice_year = date.year();
    let mut solstice = civil_date_of(december_solstice_jd(solstice_year));
    if solstice > date {
        solstice_year -= 1;
        solstice = civil_date_of(december_solstice_jd(solstice_year));
    }
    let k11 = new_moon_on_or_before(solstice);

    let next_solstice = civil_date_of(december_solstice_jd(solstice_year + 1));
    let k11_next = new_moon_on_or_before(next_solstice);
    let leap_sui = (k11_next - k11).round() as i64 == 13;

    let offset = (k - k11).round() as i64;

    let mut number = 11u32;
    let mut leap = false;
    let mut leap_seen = false;
    for i in 1..=offset {
        let ki = k11 + i as f64;
        let leap_here = leap_sui && !leap_seen && !month_has_major_term(ki);
        if leap_here {
            leap_seen = true;
        } else {
            number = number % 12 + 1;
        }
        if i == offset {
            leap = leap_here;
        }
    }

    LunarDate { month: number, day, leap }
}

/// The solar term whose longitude boundary is crossed during the civil day
/// `date`, if any.
pub fn solar_term_on(date: NaiveDate) -> Option<&'static str> {
    let jd0 = jd_at_midnight(date);
    let l0 = sun_longitude(jd0);
    let advance = (sun_longitude(jd0 + 1.0) - l0).rem_euclid(360.0);
    let before = (l0 / 15.0).floor() as i64;
    let after = ((l0 + advance) / 15.0).floor() as i64;
    if after > before {
        SOLAR_TERMS.get(after.rem_euclid(24) as usize).copied()
    } else {
        None
    }
}

/// Weekday label in the widget's style, `週一..週日`.
pub fn weekday_label(date: NaiveDate) -> &'static str {
    WEEKDAYS[date.weekday().num_days_from_monday() as usize]
}

/// Full Normal-mode subtitle line: lunar date, weekday, optional term.
pub fn calendar_line(date: NaiveDate) -> String {
    let mut line = format!("{} {}", lunar_date(date).label(), weekday_label(date));
    if let Some(term) = solar_term_on(date) {
        line.push(' ');
        line.push_str(term);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_new_year_2024() {
        // Chinese New Year fell on 2024-02-10
        let lunar = lunar_date(d(2024, 2, 10));
        assert_eq!(lunar, LunarDate { month: 1, day: 1, leap: false });
        assert_eq!(lunar.label(), "正月初一");
    }

    #[test]
    fn test_lantern_festival_2024() {
        // Fifteenth day of the first month: 2024-02-24
        let lunar = lunar_date(d(2024, 2, 24));
        assert_eq!(lunar, LunarDate { month: 1, day: 15, leap: false });
        assert_eq!(lunar.label(), "正月十五");
    }

    #[test]
    fn test_new_year_2025() {
        let lunar = lunar_date(d(2025, 1, 29));
        assert_eq!(lunar, LunarDate { month: 1, day: 1, leap: false });
    }

    #[test]
    fn test_day_counts_from_new_moon() {
        // 2024-02-10 was a new moon day, so the 15th is five days later
        assert_eq!(lunar_date(d(2024, 2, 15)).day, 6);
    }

    #[test]
    fn test_leap_sixth_month_2025() {
        // 2025 intercalates a second sixth month starting 2025-07-25
        let first = lunar_date(d(2025, 7, 25));
        assert_eq!(first, LunarDate { month: 6, day: 1, leap: true });
        assert_eq!(first.label(), "閏六月初一");

        let later = lunar_date(d(2025, 8, 7));
        assert_eq!(later, LunarDate { month: 6, day: 14, leap: true });
    }

    #[test]
    fn test_winter_month_names() {
        let lunar = LunarDate { month: 11, day: 8, leap: false };
        assert_eq!(lunar.label(), "冬月初八");
        let lunar = LunarDate { month: 12, day: 30, leap: false };
        assert_eq!(lunar.label(), "臘月三十");
    }

    #[test]
    fn test_solstice_terms() {
        // June solstice 2024: 20 June 20:51 UTC, 21 June in UTC+8
        assert_eq!(solar_term_on(d(2024, 6, 21)), Some("夏至"));
        assert_eq!(solar_term_on(d(2024, 6, 20)), None);
        assert_eq!(solar_term_on(d(2024, 6, 22)), None);
        // December solstice 2024: 21 Dec 09:20 UTC, same civil day in UTC+8
        assert_eq!(solar_term_on(d(2024, 12, 21)), Some("冬至"));
    }

    #[test]
    fn test_spring_equinox_2025() {
        // 20 March 09:01 UTC, 17:01 in UTC+8
        assert_eq!(solar_term_on(d(2025, 3, 20)), Some("春分"));
    }

    #[test]
    fn test_weekday_labels() {
        // 2024-02-10 was a Saturday
        assert_eq!(weekday_label(d(2024, 2, 10)), "週六");
        assert_eq!(weekday_label(d(2024, 2, 12)), "週一");
    }

    #[test]
    fn test_calendar_line_shape() {
        let line = calendar_line(d(2024, 2, 10));
        assert!(line.starts_with("正月初一"));
        assert!(line.contains("週六"));
    }

    #[test]
    fn test_civil_date_round_trip() {
        let date = d(2025, 8, 7);
        assert_eq!(civil_date_of(jd_at_midnight(date)), date);
        assert_eq!(civil_date_of(jd_at_midnight(date) + 0.5), date);
        assert_eq!(civil_date_of(jd_at_midnight(date) + 1.0), d(2025, 8, 8));
    }
}
