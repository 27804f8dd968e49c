//! src/format.rs
//!
//! Tick and readout formatting: plain rounded numbers, local date/time for
//! epoch-second axes, and compact human durations.

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeDelta, Timelike};

/// Values at or above this many seconds render as "> 100 Years".
pub const MAX_SECONDS: f64 = 3.154e9;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickFormat {
    #[default]
    Plain,
    /// Epoch seconds as local date and time.
    DateTime,
    /// Epoch seconds as local time of day.
    Time,
    /// Seconds as a scaled duration.
    Duration,
}

impl TickFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            TickFormat::Plain => format_plain(value),
            TickFormat::DateTime => format_timestamp(value, DATETIME_FORMAT),
            TickFormat::Time => format_timestamp(value, TIME_FORMAT),
            TickFormat::Duration => scaled_duration(value, true),
        }
    }
}

/// Round to four decimals.
pub fn format_plain(value: f64) -> String {
    let rounded = (value * 1e4).round() / 1e4;
    // avoid "-0"
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{rounded}")
}

/// Epoch seconds in local time; unrepresentable values become `+inf`/`-inf`.
pub fn format_timestamp(value: f64, pattern: &str) -> String {
    let out_of_range = || {
        if value > 0.0 {
            "+inf".to_string()
        } else {
            "-inf".to_string()
        }
    };
    if !value.is_finite() || value.abs() > i64::MAX as f64 {
        return out_of_range();
    }
    let secs = value.floor() as i64;
    let nanos = ((value - value.floor()) * 1e9) as u32;
    match DateTime::from_timestamp(secs, nanos) {
        Some(dt) => dt.with_timezone(&Local).format(pattern).to_string(),
        None => out_of_range(),
    }
}

/// Human duration with the two most significant units, e.g. `"1 m 5 s"`.
pub fn scaled_duration(seconds: f64, short: bool) -> String {
    if seconds.is_nan() || seconds < 0.0 {
        return String::new();
    }
    if seconds >= MAX_SECONDS {
        return "> 100 Years".to_string();
    }
    let (sec, msec, min, day, hour, month, year) = if short {
        ("s", "ms", "m", "D", "h", "M", "Y")
    } else {
        ("Sec", "MSec", "Min", "Day", "Hour", "Month", "Year")
    };

    // calendar arithmetic from 0001-01-01, like a stopwatch on a calendar
    let Some(base) = NaiveDate::from_ymd_opt(1, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0)) else {
        return String::new();
    };
    let delta = TimeDelta::microseconds((seconds * 1e6) as i64);
    let Some(d) = base.checked_add_signed(delta) else {
        return String::new();
    };

    if seconds < 60.0 {
        let millis = d.nanosecond() / 1_000_000;
        if millis > 0 {
            format!("{} {sec} {millis} {msec}", d.second())
        } else {
            format!("{} {sec}", d.second())
        }
    } else if seconds < 3_600.0 {
        format!("{} {min} {} {sec}", d.minute(), d.second())
    } else if seconds < 86_400.0 {
        format!("{} {hour} {} {min}", d.hour(), d.minute())
    } else if seconds < 86_400.0 * 28.0 {
        format!(
            "{} {day} {} {hour} {} {min}",
            d.day() - 1,
            d.hour(),
            d.minute()
        )
    } else if seconds < 86_400.0 * 28.0 * 12.0 {
        format!(
            "{} {month} {} {day} {} {hour}",
            d.month() - 1,
            d.day(),
            d.hour()
        )
    } else {
        format!(
            "{} {year} {} {month} {} {day}",
            d.year() - 1,
            d.month(),
            d.day()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_rounds_to_four_places() {
        assert_eq!(format_plain(1.0), "1");
        assert_eq!(format_plain(0.123456), "0.1235");
        assert_eq!(format_plain(-0.00001), "0");
        assert_eq!(TickFormat::Plain.format(-2.5), "-2.5");
    }

    #[test]
    fn durations() {
        assert_eq!(scaled_duration(-1.0, true), "");
        assert_eq!(scaled_duration(5.0, true), "5 s");
        assert_eq!(scaled_duration(1.5, true), "1 s 500 ms");
        assert_eq!(scaled_duration(61.0, true), "1 m 1 s");
        assert_eq!(scaled_duration(3_660.0, false), "1 Hour 1 Min");
        assert_eq!(scaled_duration(90_000.0, true), "1 D 1 h 0 m");
        assert_eq!(scaled_duration(4e9, true), "> 100 Years");
    }

    #[test]
    fn timestamps_out_of_range() {
        assert_eq!(format_timestamp(f64::INFINITY, TIME_FORMAT), "+inf");
        assert_eq!(format_timestamp(-1e300, TIME_FORMAT), "-inf");
        assert_eq!(TickFormat::Time.format(0.0).len(), 8);
    }
}
