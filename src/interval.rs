//! Time intervals with open-ended defaults.
//!
//! A [`TimeInterval`] has two independently optional bounds. A missing bound
//! is written as a sentinel that lies outside any real calendar date:
//!
//! | Bound | Sentinel |
//! |-------|----------|
//! | start | [`UNBOUNDED_START`] `0000-00-00T00:00:00Z` |
//! | end   | [`UNBOUNDED_END`] `9999-12-31T24:00:00Z` |
//!
//! The sentinels are never parsed as dates; they are emitted verbatim.
//!
//! ## Examples
//!
//! ```rust
//! use czml_types::TimeInterval;
//!
//! let always = TimeInterval::default();
//! assert_eq!(
//!     always.to_string(),
//!     "\"0000-00-00T00:00:00Z/9999-12-31T24:00:00Z\""
//! );
//! ```

use crate::error::Result;
use crate::time::{format_utc, DatetimeLike};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// Written in place of a missing start bound.
pub const UNBOUNDED_START: &str = "0000-00-00T00:00:00Z";
/// Written in place of a missing end bound. Hour 24 is the instant right
/// after 23:59:59 of the last day.
pub const UNBOUNDED_END: &str = "9999-12-31T24:00:00Z";

/// A time span whose bounds are normalized to UTC whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimeInterval {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl TimeInterval {
    /// Builds an interval, normalizing each present bound.
    ///
    /// # Errors
    ///
    /// Any error from normalizing a bound is returned unchanged, see
    /// [`DatetimeLike::to_utc`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::{FixedOffset, TimeZone, Utc};
    /// use czml_types::{DatetimeLike, TimeInterval};
    ///
    /// let start = Utc.with_ymd_and_hms(2019, 1, 1, 12, 0, 0).unwrap();
    /// let tz = FixedOffset::east_opt(2 * 3600).unwrap();
    /// let end = tz.with_ymd_and_hms(2019, 9, 2, 23, 59, 59).unwrap();
    ///
    /// let interval = TimeInterval::new(
    ///     Some(DatetimeLike::from(start)),
    ///     Some(DatetimeLike::from(end)),
    /// )
    /// .unwrap();
    /// assert_eq!(
    ///     interval.to_string(),
    ///     "\"2019-01-01T12:00:00Z/2019-09-02T21:59:59Z\""
    /// );
    /// ```
    pub fn new(start: Option<DatetimeLike>, end: Option<DatetimeLike>) -> Result<Self> {
        Ok(TimeInterval {
            start: start.map(|s| s.to_utc()).transpose()?,
            end: end.map(|e| e.to_utc()).transpose()?,
        })
    }

    /// The interval covering all time.
    #[must_use]
    pub fn always() -> Self {
        Self::default()
    }

    /// Replaces the start bound.
    ///
    /// # Errors
    ///
    /// Returns the error from normalizing `start`, unchanged.
    pub fn with_start(mut self, start: impl Into<DatetimeLike>) -> Result<Self> {
        self.start = Some(start.into().to_utc()?);
        Ok(self)
    }

    /// Replaces the end bound.
    ///
    /// # Errors
    ///
    /// Returns the error from normalizing `end`, unchanged.
    pub fn with_end(mut self, end: impl Into<DatetimeLike>) -> Result<Self> {
        self.end = Some(end.into().to_utc()?);
        Ok(self)
    }

    #[must_use]
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    /// Both bounds joined by `/`, without surrounding quotes.
    #[must_use]
    pub fn to_interval_string(&self) -> String {
        let start = match &self.start {
            Some(dt) => format_utc(dt),
            None => UNBOUNDED_START.to_string(),
        };
        let end = match &self.end {
            Some(dt) => format_utc(dt),
            None => UNBOUNDED_END.to_string(),
        };
        format!("{start}/{end}")
    }
}

/// Quoted, as the interval appears inside a document.
impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.to_interval_string())
    }
}

impl Serialize for TimeInterval {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_interval_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn test_default_interval() {
        assert_eq!(
            TimeInterval::always().to_string(),
            "\"0000-00-00T00:00:00Z/9999-12-31T24:00:00Z\""
        );
        assert_eq!(TimeInterval::new(None, None).unwrap(), TimeInterval::always());
    }

    #[test]
    fn test_half_open() {
        let start = Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap();
        let interval = TimeInterval::always().with_start(start).unwrap();
        assert_eq!(
            interval.to_interval_string(),
            "2020-06-01T00:00:00Z/9999-12-31T24:00:00Z"
        );

        let tz = FixedOffset::east_opt(9 * 3600).unwrap();
        let end = tz.with_ymd_and_hms(2020, 6, 1, 9, 0, 0).unwrap();
        let interval = TimeInterval::always().with_end(end).unwrap();
        assert_eq!(
            interval.to_interval_string(),
            "0000-00-00T00:00:00Z/2020-06-01T00:00:00Z"
        );
    }

    #[test]
    fn test_bound_error_propagates() {
        let err = TimeInterval::new(Some("2019/01/01".into()), None).unwrap_err();
        assert_eq!(err, Error::unrecognized_datetime("2019/01/01"));

        let err = TimeInterval::always().with_end("tomorrow").unwrap_err();
        assert_eq!(err, Error::unrecognized_datetime("tomorrow"));
    }

    #[test]
    fn test_serializes_unquoted_string() {
        let json = serde_json::to_string(&TimeInterval::always()).unwrap();
        assert_eq!(json, "\"0000-00-00T00:00:00Z/9999-12-31T24:00:00Z\"");
        assert_eq!(json, TimeInterval::always().to_string());
    }
}
