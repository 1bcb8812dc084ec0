//! OLE Automation dates: days since 1899-12-30, fractional part = time of day.
//!
//! Conversion rounds to the nearest millisecond. For negative dates the
//! fractional part still counts forward from midnight (`-1.25` is
//! 1899-12-29 06:00, not 18:00).

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

const MILLIS_PER_DAY: i64 = 86_400_000;

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Convert an OLE Automation date to a naive timestamp.
///
/// Non-finite input maps to the OLE epoch.
pub fn to_datetime(oa_date: f64) -> NaiveDateTime {
    if !oa_date.is_finite() {
        return epoch();
    }
    let half = if oa_date >= 0.0 { 0.5 } else { -0.5 };
    let mut millis = (oa_date * MILLIS_PER_DAY as f64 + half) as i64;
    if millis < 0 {
        millis -= (millis % MILLIS_PER_DAY) * 2;
    }
    epoch()
        .checked_add_signed(TimeDelta::milliseconds(millis))
        .unwrap_or_else(epoch)
}

/// Convert a naive timestamp back to an OLE Automation date.
pub fn from_datetime(dt: NaiveDateTime) -> f64 {
    let millis = (dt - epoch()).num_milliseconds();
    if millis >= 0 {
        return millis as f64 / MILLIS_PER_DAY as f64;
    }
    let days = millis / MILLIS_PER_DAY;
    let rem = millis % MILLIS_PER_DAY;
    if rem == 0 {
        return days as f64;
    }
    // Whole days count backwards, the time of day still counts forwards.
    let day = days - 1;
    let time_of_day = rem + MILLIS_PER_DAY;
    day as f64 - time_of_day as f64 / MILLIS_PER_DAY as f64
}
