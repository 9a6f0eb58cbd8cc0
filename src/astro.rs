//! Astronomical instants.
//!
//! [`AstroTime`] stores an instant as a two-part Julian date on a named
//! [`TimeScale`], the way astronomy libraries do. Splitting the date keeps
//! sub-microsecond precision: `jd1` usually carries the day and `jd2` the
//! fraction of the day.
//!
//! Conversion back to civil UTC time truncates to the microsecond, the
//! resolution of a civil datetime; a fraction is never carried into the next
//! second. The text or precision the instant was built from is not retained.
//!
//! ## Examples
//!
//! ```rust
//! use czml_types::{format_datetime_like, AstroTime};
//!
//! let t = AstroTime::from_iso("2012-03-15T10:16:06.97400000000198Z").unwrap();
//! assert_eq!(format_datetime_like(t).unwrap(), "2012-03-15T10:16:06Z");
//! ```

use crate::error::{Error, Result};
use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveDateTime, Timelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Julian date of the MJD epoch, 1858-11-17T00:00:00.
pub const MJD_ZERO: f64 = 2_400_000.5;

const SECONDS_PER_DAY: f64 = 86_400.0;
const MICROS_PER_DAY: f64 = 86_400_000_000.0;
/// Float error allowed below a whole microsecond, 1e-10 s.
const TRUNCATION_TOLERANCE_MICROS: f64 = 1.0e-4;
/// TT - TAI, in microseconds.
const TT_MINUS_TAI_MICROS: i64 = 32_184_000;
/// Largest |jd1| + |jd2| accepted; keeps every date inside chrono's range.
const MAX_JD: f64 = 1.0e8;

/// UTC dates on which TAI - UTC changed, with the new offset in seconds.
const LEAP_SECONDS: &[(i32, u32, i64)] = &[
    (1972, 1, 10),
    (1972, 7, 11),
    (1973, 1, 12),
    (1974, 1, 13),
    (1975, 1, 14),
    (1976, 1, 15),
    (1977, 1, 16),
    (1978, 1, 17),
    (1979, 1, 18),
    (1980, 1, 19),
    (1981, 7, 20),
    (1982, 7, 21),
    (1983, 7, 22),
    (1985, 7, 23),
    (1988, 1, 24),
    (1990, 1, 25),
    (1991, 1, 26),
    (1992, 7, 27),
    (1993, 7, 28),
    (1994, 7, 29),
    (1996, 1, 30),
    (1997, 7, 31),
    (1999, 1, 32),
    (2006, 1, 33),
    (2009, 1, 34),
    (2012, 7, 35),
    (2015, 7, 36),
    (2017, 1, 37),
];

static ISO_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})[T ](\d{2}):(\d{2}):(\d{2})(\.\d+)?Z?$")
        .expect("valid iso time regex")
});

/// Time scale an [`AstroTime`] is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeScale {
    /// Coordinated Universal Time
    #[default]
    Utc,
    /// International Atomic Time
    Tai,
    /// Terrestrial Time
    Tt,
}

impl TimeScale {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TimeScale::Utc => "utc",
            TimeScale::Tai => "tai",
            TimeScale::Tt => "tt",
        }
    }
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// TAI - UTC in seconds at the given UTC date.
///
/// Dates before 1972 use the initial 10 s offset.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use czml_types::astro::tai_minus_utc;
///
/// let date = NaiveDate::from_ymd_opt(2012, 3, 15).unwrap();
/// assert_eq!(tai_minus_utc(date), 34);
/// ```
#[must_use]
pub fn tai_minus_utc(date: NaiveDate) -> i64 {
    let key = (date.year(), date.month());
    LEAP_SECONDS
        .iter()
        .rev()
        .find(|(year, month, _)| (*year, *month) <= key)
        .map_or(10, |(_, _, offset)| *offset)
}

static MJD_EPOCH: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(1858, 11, 17).expect("valid mjd epoch"));

fn mjd_epoch() -> NaiveDate {
    *MJD_EPOCH
}

/// An instant on an astronomical time scale, as a two-part Julian date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AstroTime {
    jd1: f64,
    jd2: f64,
    scale: TimeScale,
}

impl AstroTime {
    /// Builds an instant from a two-part Julian date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAstroTime`] if either part is not finite or the
    /// date is absurdly far from the present era.
    pub fn from_jd(jd1: f64, jd2: f64, scale: TimeScale) -> Result<Self> {
        if !jd1.is_finite() || !jd2.is_finite() {
            return Err(Error::invalid_astro_time(format!(
                "julian date parts must be finite, got ({jd1}, {jd2})"
            )));
        }
        if jd1.abs() + jd2.abs() > MAX_JD {
            return Err(Error::invalid_astro_time(format!(
                "julian date ({jd1}, {jd2}) out of range"
            )));
        }
        Ok(AstroTime { jd1, jd2, scale })
    }

    /// Builds an instant from a Modified Julian Date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAstroTime`] under the same conditions as
    /// [`AstroTime::from_jd`].
    pub fn from_mjd(mjd: f64, scale: TimeScale) -> Result<Self> {
        Self::from_jd(MJD_ZERO, mjd, scale)
    }

    /// Parses ISO text on the UTC scale.
    ///
    /// Accepts `YYYY-MM-DDTHH:MM:SS[.fff...][Z]` (a space may replace the `T`)
    /// with any number of fractional digits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAstroTime`] if the text is not ISO formatted or
    /// names an impossible date or time of day.
    pub fn from_iso(s: &str) -> Result<Self> {
        Self::from_iso_with_scale(s, TimeScale::Utc)
    }

    /// Parses ISO text on the given scale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAstroTime`] if the text is not ISO formatted or
    /// names an impossible date or time of day.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use czml_types::{AstroTime, TimeScale};
    ///
    /// let t = AstroTime::from_iso_with_scale("2000-01-01 12:00:00", TimeScale::Tt).unwrap();
    /// assert_eq!(t.jd1() + t.jd2(), 2_451_545.0);
    /// ```
    pub fn from_iso_with_scale(s: &str, scale: TimeScale) -> Result<Self> {
        let bad = || Error::invalid_astro_time(format!("{s:?} is not an ISO time"));
        let caps = ISO_TIME_RE.captures(s).ok_or_else(bad)?;
        let field = |i: usize| -> Result<u32> {
            caps.get(i)
                .and_then(|m| m.as_str().parse().ok())
                .ok_or_else(bad)
        };

        let (year, month, day) = (field(1)?, field(2)?, field(3)?);
        let (hour, minute, second) = (field(4)?, field(5)?, field(6)?);
        // Second 60 is allowed for leap seconds.
        if hour > 23 || minute > 59 || second > 60 {
            return Err(bad());
        }
        let fraction = match caps.get(7) {
            Some(m) => format!("0{}", m.as_str()).parse::<f64>().map_err(|_| bad())?,
            None => 0.0,
        };

        let date = NaiveDate::from_ymd_opt(year as i32, month, day).ok_or_else(bad)?;
        let days = date.signed_duration_since(mjd_epoch()).num_days();
        let seconds = f64::from(hour * 3600 + minute * 60 + second) + fraction;

        Self::from_jd(days as f64 + MJD_ZERO, seconds / SECONDS_PER_DAY, scale)
    }

    /// Builds a UTC instant from a civil UTC datetime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAstroTime`] if the date is too far from the
    /// present era to be held as a Julian date.
    pub fn from_datetime(dt: &DateTime<Utc>) -> Result<Self> {
        let days = dt
            .date_naive()
            .signed_duration_since(mjd_epoch())
            .num_days();
        let seconds = f64::from(dt.num_seconds_from_midnight())
            + f64::from(dt.nanosecond()) / 1.0e9;
        Self::from_jd(
            days as f64 + MJD_ZERO,
            seconds / SECONDS_PER_DAY,
            TimeScale::Utc,
        )
    }

    #[inline]
    #[must_use]
    pub fn jd1(&self) -> f64 {
        self.jd1
    }

    #[inline]
    #[must_use]
    pub fn jd2(&self) -> f64 {
        self.jd2
    }

    #[inline]
    #[must_use]
    pub fn scale(&self) -> TimeScale {
        self.scale
    }

    /// Reinterprets the same Julian date on another scale.
    pub fn with_scale(self, scale: TimeScale) -> Self {
        AstroTime { scale, ..self }
    }

    /// Converts to civil UTC time, truncated to the microsecond.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAstroTime`] if the calendar date cannot be
    /// represented.
    pub fn to_utc(&self) -> Result<DateTime<Utc>> {
        let local = self.to_naive()?;
        let utc = match self.scale {
            TimeScale::Utc => local,
            TimeScale::Tai => tai_to_utc(local)?,
            TimeScale::Tt => {
                let tai = local
                    .checked_sub_signed(Duration::microseconds(TT_MINUS_TAI_MICROS))
                    .ok_or_else(|| self.out_of_range())?;
                tai_to_utc(tai)?
            }
        };
        if self.scale != TimeScale::Utc {
            log::trace!("converted {} instant {local} to utc {utc}", self.scale);
        }
        Ok(DateTime::from_naive_utc_and_offset(utc, Utc))
    }

    /// Calendar time on this instant's own scale.
    fn to_naive(&self) -> Result<NaiveDateTime> {
        let whole = self.jd1.floor() + self.jd2.floor();
        // Julian days start at noon; shift to midnight.
        let mut frac = (self.jd1 - self.jd1.floor()) + (self.jd2 - self.jd2.floor()) - 0.5;
        let mut day = (whole as i64) - 2_400_000;
        while frac < 0.0 {
            frac += 1.0;
            day -= 1;
        }
        while frac >= 1.0 {
            frac -= 1.0;
            day += 1;
        }

        // Truncate; the tolerance only absorbs float error on exact microseconds.
        let micros = (frac * MICROS_PER_DAY + TRUNCATION_TOLERANCE_MICROS).floor() as i64;
        let date = if day >= 0 {
            mjd_epoch().checked_add_days(Days::new(day as u64))
        } else {
            mjd_epoch().checked_sub_days(Days::new(day.unsigned_abs()))
        };
        date.and_then(|d| d.and_hms_opt(0, 0, 0))
            .and_then(|midnight| midnight.checked_add_signed(Duration::microseconds(micros)))
            .ok_or_else(|| self.out_of_range())
    }

    fn out_of_range(&self) -> Error {
        Error::invalid_astro_time(format!(
            "julian date ({}, {}) has no calendar representation",
            self.jd1, self.jd2
        ))
    }
}

fn tai_to_utc(tai: NaiveDateTime) -> Result<NaiveDateTime> {
    let shift = |offset: i64| {
        tai.checked_sub_signed(Duration::seconds(offset))
            .ok_or_else(|| Error::invalid_astro_time(format!("{tai} TAI out of range")))
    };
    // The offset is keyed on UTC, so test each candidate against its own date.
    for (year, month, offset) in LEAP_SECONDS.iter().rev() {
        let Some(start) = NaiveDate::from_ymd_opt(*year, *month, 1) else {
            continue;
        };
        let utc = shift(*offset)?;
        if utc.date() >= start {
            return Ok(utc);
        }
    }
    shift(10)
}

impl fmt::Display for AstroTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "jd({}, {}) {}", self.jd1, self.jd2, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_iso_keeps_microseconds() {
        let t = AstroTime::from_iso("2012-03-15T10:16:06.974Z").unwrap();
        let utc = t.to_utc().unwrap();
        assert_eq!(
            utc,
            Utc.with_ymd_and_hms(2012, 3, 15, 10, 16, 6).unwrap() + Duration::microseconds(974_000)
        );
    }

    #[test]
    fn test_fraction_never_carries_into_next_second() {
        let t = AstroTime::from_iso("2012-03-15T10:16:06.9999996Z").unwrap();
        let utc = t.to_utc().unwrap();
        assert_eq!(utc.second(), 6);
        assert_eq!(utc.nanosecond(), 999_999_000);

        let t = AstroTime::from_iso("2012-12-31T23:59:59.999999999Z").unwrap();
        let utc = t.to_utc().unwrap();
        assert_eq!(
            utc,
            Utc.with_ymd_and_hms(2012, 12, 31, 23, 59, 59).unwrap()
                + Duration::microseconds(999_999)
        );
    }

    #[test]
    fn test_mjd_epoch() {
        assert_eq!(mjd_epoch(), NaiveDate::from_ymd_opt(1858, 11, 17).unwrap());
        let t = AstroTime::from_mjd(0.0, TimeScale::Utc).unwrap();
        assert_eq!(
            t.to_utc().unwrap(),
            Utc.with_ymd_and_hms(1858, 11, 17, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_whole_seconds_do_not_drift() {
        for s in [
            "2000-01-01T00:00:00",
            "2019-09-02T21:59:59Z",
            "1999-12-31 23:59:59",
            "1858-11-16T12:00:00",
        ] {
            let utc = AstroTime::from_iso(s).unwrap().to_utc().unwrap();
            assert_eq!(utc.nanosecond(), 0, "{s}");
        }
    }

    #[test]
    fn test_from_jd_j2000() {
        let t = AstroTime::from_jd(2_451_545.0, 0.0, TimeScale::Utc).unwrap();
        assert_eq!(
            t.to_utc().unwrap(),
            Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_from_mjd() {
        let t = AstroTime::from_mjd(58_849.25, TimeScale::Utc).unwrap();
        assert_eq!(
            t.to_utc().unwrap(),
            Utc.with_ymd_and_hms(2020, 1, 1, 6, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_tai_and_tt_scales() {
        let tai = AstroTime::from_iso_with_scale("2017-06-01T00:00:37", TimeScale::Tai).unwrap();
        assert_eq!(
            tai.to_utc().unwrap(),
            Utc.with_ymd_and_hms(2017, 6, 1, 0, 0, 0).unwrap()
        );

        let tt =
            AstroTime::from_iso_with_scale("2017-06-01T00:01:09.184", TimeScale::Tt).unwrap();
        assert_eq!(
            tt.to_utc().unwrap(),
            Utc.with_ymd_and_hms(2017, 6, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_leap_second_table() {
        let before = NaiveDate::from_ymd_opt(1960, 1, 1).unwrap();
        let between = NaiveDate::from_ymd_opt(2016, 12, 31).unwrap();
        let after = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(tai_minus_utc(before), 10);
        assert_eq!(tai_minus_utc(between), 36);
        assert_eq!(tai_minus_utc(after), 37);
    }

    #[test]
    fn test_datetime_roundtrip() {
        let dt = Utc.with_ymd_and_hms(2019, 1, 1, 12, 0, 0).unwrap();
        let t = AstroTime::from_datetime(&dt).unwrap();
        assert_eq!(t.to_utc().unwrap(), dt);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(AstroTime::from_iso("2019/01/01").is_err());
        assert!(AstroTime::from_iso("2019-02-30T00:00:00").is_err());
        assert!(AstroTime::from_iso("2019-01-01T24:00:00").is_err());
        assert!(AstroTime::from_jd(f64::NAN, 0.0, TimeScale::Utc).is_err());
        assert!(AstroTime::from_jd(1.0e12, 0.0, TimeScale::Utc).is_err());
    }
}
