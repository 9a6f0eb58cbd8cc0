//! # czml_types
//!
//! Validated value types and canonical time formatting for CZML documents.
//!
//! ## What is CZML?
//!
//! CZML is a JSON format describing time-dynamic 3D scenes: entities with
//! positions, colors, models and the time intervals over which they apply.
//! This crate covers the individual values inside such a document. Each value
//! is validated once, at construction, and serializes to the exact form a CZML
//! consumer expects.
//!
//! ## Key Features
//!
//! - **Coordinate Layouts**: `[x, y, z]` points or `[t, x, y, z, ...]`
//!   time-tagged samples, checked by length
//! - **Canonical Time**: civil and astronomical instants normalized to
//!   `YYYY-MM-DDTHH:MM:SSZ`, fractional seconds dropped
//! - **Open Intervals**: missing interval bounds written as sentinels
//! - **Locators**: URLs and `data:` URIs validated before they reach a document
//! - **Serde Compatible**: every value implements `Serialize`; validated values
//!   re-validate on `Deserialize`
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use czml_types::{to_string, Cartesian3Value, TimeInterval, Uri};
//!
//! let position = Cartesian3Value::new(vec![1_000.0, 2_000.0, 3_000.0]).unwrap();
//! assert_eq!(to_string(&position).unwrap(), "[1000.0,2000.0,3000.0]");
//!
//! let start = Utc.with_ymd_and_hms(2019, 1, 1, 12, 0, 0).unwrap();
//! let availability = TimeInterval::always().with_start(start).unwrap();
//! assert_eq!(
//!     to_string(&availability).unwrap(),
//!     "\"2019-01-01T12:00:00Z/9999-12-31T24:00:00Z\""
//! );
//!
//! assert!(Uri::new("a").is_err());
//! ```
//!
//! ## Error Handling
//!
//! Every constructor returns [`Result`]. Validation is all-or-nothing; see
//! [`Error`] for the variants and their messages.

pub mod astro;
pub mod color;
pub mod coords;
pub mod error;
pub mod interval;
pub mod options;
pub mod reference;
pub mod time;
pub mod uri;

pub use astro::{AstroTime, TimeScale};
pub use color::{RgbaValue, RgbafValue};
pub use coords::{
    Cartesian3Value, CartographicDegreesValue, CartographicRadiansValue, CoordinateKind, Sample,
    TimeTaggedCoords,
};
pub use error::{Error, Result};
pub use interval::{TimeInterval, UNBOUNDED_END, UNBOUNDED_START};
pub use options::JsonOptions;
pub use reference::ReferenceValue;
pub use time::{format_datetime_like, CivilTime, DatetimeLike};
pub use uri::{Uri, UriKind};

use serde::Serialize;
use std::io;

/// Render any value as compact JSON.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, JsonOptions::default())
}

/// Render any value as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, JsonOptions::pretty())
}

/// Render any value as JSON with custom options.
///
/// # Examples
///
/// ```rust
/// use czml_types::{to_string_with_options, JsonOptions, ReferenceValue};
///
/// let r = ReferenceValue::new("sat#position").unwrap();
/// let json = to_string_with_options(&r, JsonOptions::pretty()).unwrap();
/// assert_eq!(json, "\"sat#position\"");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: JsonOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut buffer = Vec::new();
    write_json(&mut buffer, value, &options)?;
    String::from_utf8(buffer).map_err(|e| Error::Json(e.to_string()))
}

/// Convert any value to a `serde_json::Value`, e.g. to place it inside a packet.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<serde_json::Value>
where
    T: ?Sized + Serialize,
{
    Ok(serde_json::to_value(value)?)
}

/// Write any value as compact JSON.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, JsonOptions::default())
}

/// Write any value as JSON with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: JsonOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let json = to_string_with_options(value, options)?;
    writer
        .write_all(json.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

fn write_json<T>(buffer: &mut Vec<u8>, value: &T, options: &JsonOptions) -> Result<()>
where
    T: ?Sized + Serialize,
{
    if options.pretty {
        let indent = options.indent_bytes();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
        let mut serializer = serde_json::Serializer::with_formatter(buffer, formatter);
        value.serialize(&mut serializer)?;
    } else {
        let mut serializer = serde_json::Serializer::new(buffer);
        value.serialize(&mut serializer)?;
    }
    Ok(())
}
