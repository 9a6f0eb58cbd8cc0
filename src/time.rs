//! Canonical datetime formatting.
//!
//! Every instant written into a document uses the same canonical form:
//! `YYYY-MM-DDTHH:MM:SSZ`. Instants are converted to UTC and truncated to whole
//! seconds; fractional seconds are dropped, never rounded.
//!
//! ## Accepted Inputs
//!
//! [`DatetimeLike`] enumerates what the formatter understands:
//!
//! - [`CivilTime`]: a chrono datetime, with an offset or naive (taken as UTC)
//! - [`AstroTime`]: an astronomical instant on any supported time scale
//!
//! Anything else, including date text such as `"2019/01/01"`, ends up in
//! [`DatetimeLike::Unrecognized`] and is rejected. Free-form strings are not
//! parsed.
//!
//! ## Examples
//!
//! ```rust
//! use chrono::{FixedOffset, TimeZone};
//! use czml_types::format_datetime_like;
//!
//! let tz = FixedOffset::east_opt(2 * 3600).unwrap();
//! let end = tz.with_ymd_and_hms(2019, 9, 2, 23, 59, 59).unwrap();
//! assert_eq!(format_datetime_like(end).unwrap(), "2019-09-02T21:59:59Z");
//!
//! assert!(format_datetime_like("2019/01/01").is_err());
//! ```

use crate::astro::AstroTime;
use crate::error::{Error, Result};
use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDateTime, Offset, SubsecRound, TimeZone, Utc,
};
use std::fmt;

/// Canonical output format, UTC with whole seconds.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A civil (calendar and clock) datetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CivilTime {
    /// Datetime with a known UTC offset.
    Aware(DateTime<FixedOffset>),
    /// Datetime without an offset, taken to be UTC already.
    Naive(NaiveDateTime),
}

impl CivilTime {
    #[must_use]
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            CivilTime::Aware(dt) => dt.with_timezone(&Utc),
            CivilTime::Naive(naive) => Utc.from_utc_datetime(naive),
        }
    }
}

/// The representations accepted by [`format_datetime_like`].
#[derive(Debug, Clone, PartialEq)]
pub enum DatetimeLike {
    Civil(CivilTime),
    Astronomical(AstroTime),
    /// Input that is not datetime-like. Always rejected.
    Unrecognized(String),
}

impl DatetimeLike {
    /// Resolves the input to a UTC instant truncated to whole seconds.
    ///
    /// # Errors
    ///
    /// - [`Error::UnrecognizedDatetime`] for [`DatetimeLike::Unrecognized`]
    /// - [`Error::InvalidAstroTime`] if an astronomical instant has no calendar date
    /// - [`Error::DatetimeOutOfRange`] if the year is outside `1..=9999`
    pub fn to_utc(&self) -> Result<DateTime<Utc>> {
        let utc = match self {
            DatetimeLike::Civil(civil) => civil.to_utc(),
            DatetimeLike::Astronomical(astro) => astro.to_utc()?,
            DatetimeLike::Unrecognized(input) => {
                log::debug!("rejected non datetime-like input of {} bytes", input.len());
                return Err(Error::unrecognized_datetime(input));
            }
        };
        if !(1..=9999).contains(&utc.year()) {
            return Err(Error::datetime_out_of_range(utc));
        }
        Ok(utc.trunc_subsecs(0))
    }
}

impl fmt::Display for DatetimeLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatetimeLike::Civil(CivilTime::Aware(dt)) => write!(f, "{}", dt.to_rfc3339()),
            DatetimeLike::Civil(CivilTime::Naive(naive)) => write!(f, "{naive}"),
            DatetimeLike::Astronomical(astro) => write!(f, "{astro}"),
            DatetimeLike::Unrecognized(input) => write!(f, "{input:?}"),
        }
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DatetimeLike {
    fn from(dt: DateTime<Tz>) -> Self {
        let offset = dt.offset().fix();
        DatetimeLike::Civil(CivilTime::Aware(dt.with_timezone(&offset)))
    }
}

impl From<NaiveDateTime> for DatetimeLike {
    fn from(naive: NaiveDateTime) -> Self {
        DatetimeLike::Civil(CivilTime::Naive(naive))
    }
}

impl From<CivilTime> for DatetimeLike {
    fn from(civil: CivilTime) -> Self {
        DatetimeLike::Civil(civil)
    }
}

impl From<AstroTime> for DatetimeLike {
    fn from(astro: AstroTime) -> Self {
        DatetimeLike::Astronomical(astro)
    }
}

impl From<&str> for DatetimeLike {
    fn from(s: &str) -> Self {
        DatetimeLike::Unrecognized(s.to_string())
    }
}

impl From<String> for DatetimeLike {
    fn from(s: String) -> Self {
        DatetimeLike::Unrecognized(s)
    }
}

/// Formats a UTC instant in the canonical form, dropping any fraction.
///
/// # Examples
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use czml_types::time::format_utc;
///
/// let dt = Utc.with_ymd_and_hms(2019, 1, 1, 12, 0, 0).unwrap();
/// assert_eq!(format_utc(&dt), "2019-01-01T12:00:00Z");
/// ```
#[must_use]
pub fn format_utc(dt: &DateTime<Utc>) -> String {
    dt.format(CANONICAL_FORMAT).to_string()
}

/// Normalizes any datetime-like value to `YYYY-MM-DDTHH:MM:SSZ`.
///
/// # Errors
///
/// Returns [`Error::UnrecognizedDatetime`] for strings and other unrecognized
/// input, and propagates conversion failures of astronomical instants.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use czml_types::format_datetime_like;
///
/// let naive = NaiveDate::from_ymd_opt(2019, 1, 1)
///     .unwrap()
///     .and_hms_milli_opt(12, 0, 0, 999)
///     .unwrap();
/// assert_eq!(format_datetime_like(naive).unwrap(), "2019-01-01T12:00:00Z");
/// ```
pub fn format_datetime_like(value: impl Into<DatetimeLike>) -> Result<String> {
    let value = value.into();
    value.to_utc().map(|utc| format_utc(&utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astro::TimeScale;
    use chrono::{Duration, NaiveDate};

    #[test]
    fn test_aware_converted_to_utc() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let dt = tz.with_ymd_and_hms(2019, 12, 31, 22, 30, 0).unwrap();
        assert_eq!(format_datetime_like(dt).unwrap(), "2020-01-01T03:30:00Z");
    }

    #[test]
    fn test_fraction_truncated_not_rounded() {
        let dt = Utc.with_ymd_and_hms(2012, 3, 15, 10, 16, 6).unwrap()
            + Duration::microseconds(999_999);
        assert_eq!(format_datetime_like(dt).unwrap(), "2012-03-15T10:16:06Z");
    }

    #[test]
    fn test_strings_rejected() {
        for s in ["2019/01/01", "2019-01-01T00:00:00Z", ""] {
            assert_eq!(
                format_datetime_like(s).unwrap_err(),
                Error::unrecognized_datetime(s)
            );
        }
        assert!(format_datetime_like(String::from("now")).is_err());
    }

    #[test]
    fn test_astronomical_truncated() {
        let t = AstroTime::from_iso("2012-03-15T10:16:06.97400000000198Z").unwrap();
        assert_eq!(format_datetime_like(t).unwrap(), "2012-03-15T10:16:06Z");

        let tai = t.with_scale(TimeScale::Tai);
        assert_eq!(format_datetime_like(tai).unwrap(), "2012-03-15T10:15:32Z");
    }

    #[test]
    fn test_astronomical_near_second_boundary() {
        for (input, expected) in [
            ("2012-03-15T10:16:06.9999996Z", "2012-03-15T10:16:06Z"),
            ("2012-03-15T10:59:59.999999Z", "2012-03-15T10:59:59Z"),
            ("2012-12-31T23:59:59.9999997Z", "2012-12-31T23:59:59Z"),
            ("2012-12-31T23:59:59.999999999Z", "2012-12-31T23:59:59Z"),
        ] {
            let t = AstroTime::from_iso(input).unwrap();
            assert_eq!(format_datetime_like(t).unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn test_year_out_of_range() {
        let naive = NaiveDate::from_ymd_opt(10_000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(matches!(
            format_datetime_like(naive),
            Err(Error::DatetimeOutOfRange { .. })
        ));
    }

    #[test]
    fn test_canonical_is_idempotent() {
        let dt = Utc.with_ymd_and_hms(2019, 9, 2, 21, 59, 59).unwrap();
        let first = format_datetime_like(dt).unwrap();
        let reparsed = DateTime::parse_from_rfc3339(&first).unwrap();
        assert_eq!(format_datetime_like(reparsed).unwrap(), first);
    }
}
