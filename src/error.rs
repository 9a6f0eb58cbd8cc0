//! Error types for value validation and serialization.
//!
//! Every value type in this crate validates its input at construction time and
//! either returns a fully built value or one of the errors below. Nothing is
//! partially committed.
//!
//! ## Error Categories
//!
//! - **Layout Errors**: a numeric sequence with the wrong number of elements
//! - **Range Errors**: color components outside their legal range
//! - **Temporal Errors**: inputs that are not datetime-like, or instants that
//!   cannot be written in the canonical form
//! - **Locator Errors**: strings that are neither a URL nor a data URI
//! - **Output Errors**: JSON or I/O failures while rendering values
//!
//! ## Examples
//!
//! ```rust
//! use czml_types::{Cartesian3Value, Error};
//!
//! let err = Cartesian3Value::new(vec![2.0, 2.0]).unwrap_err();
//! assert!(matches!(err, Error::InvalidLength { found: 2, .. }));
//! assert!(err
//!     .to_string()
//!     .contains("Input values must have either 3 or N * 4 values"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while validating or rendering values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Sequence length is neither the plain layout nor a multiple of the time-tagged layout
    #[error("Input values must have either {coords} or N * {tagged} values, where N is the number of time-tagged samples (found {found})")]
    InvalidLength {
        coords: usize,
        tagged: usize,
        found: usize,
    },

    /// Integer color component outside 0-255
    #[error("Color values must be integers in the range 0-255.")]
    InvalidRgba,

    /// Float color component outside 0-1
    #[error("Color values must be floats in the range 0-1.")]
    InvalidRgbaf,

    /// Reference string without an `id#property` shape
    #[error("Invalid reference string format. Input must be of the form id#property, got {reference:?}")]
    InvalidReference { reference: String },

    /// Input is not one of the recognized datetime-like representations
    #[error("Cannot format {input:?} as a datetime: expected a civil or astronomical instant")]
    UnrecognizedDatetime { input: String },

    /// Astronomical instant could not be built
    #[error("Invalid astronomical time: {msg}")]
    InvalidAstroTime { msg: String },

    /// Instant falls outside the four-digit years of the canonical form
    #[error("Datetime out of range: {input} cannot be written as YYYY-MM-DDTHH:MM:SSZ")]
    DatetimeOutOfRange { input: String },

    /// Locator matches neither grammar
    #[error("uri must be a URL or a data URI")]
    InvalidUri { uri: String },

    /// JSON rendering failure
    #[error("JSON error: {0}")]
    Json(String),

    /// IO error while writing rendered output
    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Creates a layout error for a sequence of `found` values.
    pub fn invalid_length(coords: usize, found: usize) -> Self {
        Error::InvalidLength {
            coords,
            tagged: coords + 1,
            found,
        }
    }

    /// Creates an error for a value that is not datetime-like.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use czml_types::Error;
    ///
    /// let err = Error::unrecognized_datetime("2019/01/01");
    /// assert!(err.to_string().contains("2019/01/01"));
    /// assert!(err.is_validation());
    /// ```
    pub fn unrecognized_datetime(input: &str) -> Self {
        Error::UnrecognizedDatetime {
            input: input.to_string(),
        }
    }

    pub fn invalid_astro_time<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidAstroTime {
            msg: msg.to_string(),
        }
    }

    pub fn datetime_out_of_range<T: fmt::Display>(input: T) -> Self {
        Error::DatetimeOutOfRange {
            input: input.to_string(),
        }
    }

    pub fn invalid_reference(reference: &str) -> Self {
        Error::InvalidReference {
            reference: reference.to_string(),
        }
    }

    pub fn invalid_uri(uri: &str) -> Self {
        Error::InvalidUri {
            uri: uri.to_string(),
        }
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` for errors raised while validating input, as opposed to
    /// failures while rendering already valid values.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        !matches!(self, Error::Json(_) | Error::Io(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
