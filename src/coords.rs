//! Time-tagged coordinate values.
//!
//! A coordinate value is a flat list of numbers in one of two layouts:
//!
//! - **Plain**: exactly `NUM_COORDS` numbers describing a single point
//! - **Time-tagged**: `N * (NUM_COORDS + 1)` numbers, each sample being a
//!   time offset followed by the coordinates
//!
//! The layout is decided purely by length. Time offsets and coordinates are
//! stored exactly as given; there is no range checking.
//!
//! ## Examples
//!
//! ```rust
//! use czml_types::Cartesian3Value;
//!
//! let point = Cartesian3Value::new(vec![1.0, 2.0, 3.0]).unwrap();
//! assert!(!point.is_time_tagged());
//!
//! let path = Cartesian3Value::new(vec![
//!     0.0, 1.0, 2.0, 3.0,
//!     60.0, 4.0, 5.0, 6.0,
//! ])
//! .unwrap();
//! assert_eq!(path.samples().count(), 2);
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// A family of coordinates sharing the time-tagged layout rule.
pub trait CoordinateKind {
    /// Number of coordinates in one untagged point.
    const NUM_COORDS: usize;
    /// Human-readable name used in diagnostics.
    const NAME: &'static str;
}

/// Cartesian x, y, z in meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cartesian3 {}

/// Longitude, latitude in radians and height in meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartographicRadians {}

/// Longitude, latitude in degrees and height in meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartographicDegrees {}

impl CoordinateKind for Cartesian3 {
    const NUM_COORDS: usize = 3;
    const NAME: &'static str = "cartesian";
}

impl CoordinateKind for CartographicRadians {
    const NUM_COORDS: usize = 3;
    const NAME: &'static str = "cartographicRadians";
}

impl CoordinateKind for CartographicDegrees {
    const NUM_COORDS: usize = 3;
    const NAME: &'static str = "cartographicDegrees";
}

pub type Cartesian3Value = TimeTaggedCoords<Cartesian3>;
pub type CartographicRadiansValue = TimeTaggedCoords<CartographicRadians>;
pub type CartographicDegreesValue = TimeTaggedCoords<CartographicDegrees>;

/// Checks the plain-or-time-tagged layout rule for `len` values.
///
/// Accepts `coords` values, or a strictly positive multiple of `coords + 1`.
pub(crate) fn check_layout(len: usize, coords: usize, name: &str) -> Result<()> {
    let tagged = coords + 1;
    if len == coords || (len > 0 && len % tagged == 0) {
        Ok(())
    } else {
        log::debug!("rejected {name} value with {len} elements");
        Err(Error::invalid_length(coords, len))
    }
}

/// A validated list of (optionally time-tagged) coordinates.
pub struct TimeTaggedCoords<K: CoordinateKind> {
    values: Vec<f64>,
    kind: PhantomData<K>,
}

/// One point of a coordinate value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<'a> {
    /// Time offset of the sample, absent for the plain layout.
    pub time: Option<f64>,
    pub coords: &'a [f64],
}

impl<K: CoordinateKind> TimeTaggedCoords<K> {
    /// Validates the layout of `values` and stores them unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] unless the length is `NUM_COORDS` or a
    /// positive multiple of `NUM_COORDS + 1`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use czml_types::Cartesian3Value;
    ///
    /// assert!(Cartesian3Value::new(vec![0.0; 3]).is_ok());
    /// assert!(Cartesian3Value::new(vec![0.0; 8]).is_ok());
    /// assert!(Cartesian3Value::new(vec![5.0; 5]).is_err());
    /// ```
    pub fn new(values: impl Into<Vec<f64>>) -> Result<Self> {
        let values = values.into();
        check_layout(values.len(), K::NUM_COORDS, K::NAME)?;
        Ok(TimeTaggedCoords {
            values,
            kind: PhantomData,
        })
    }

    #[inline]
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; an empty list is never a valid layout.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `true` if the values use the `N * (NUM_COORDS + 1)` layout.
    #[inline]
    #[must_use]
    pub fn is_time_tagged(&self) -> bool {
        self.values.len() != K::NUM_COORDS
    }

    /// Iterates over the points in order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use czml_types::Cartesian3Value;
    ///
    /// let value = Cartesian3Value::new(vec![10.0, 1.0, 2.0, 3.0]).unwrap();
    /// let sample = value.samples().next().unwrap();
    /// assert_eq!(sample.time, Some(10.0));
    /// assert_eq!(sample.coords, &[1.0, 2.0, 3.0]);
    /// ```
    pub fn samples(&self) -> impl Iterator<Item = Sample<'_>> + '_ {
        let tagged = self.is_time_tagged();
        let width = if tagged {
            K::NUM_COORDS + 1
        } else {
            K::NUM_COORDS
        };
        self.values.chunks_exact(width).map(move |chunk| {
            if tagged {
                Sample {
                    time: Some(chunk[0]),
                    coords: &chunk[1..],
                }
            } else {
                Sample {
                    time: None,
                    coords: chunk,
                }
            }
        })
    }
}

impl<K: CoordinateKind> Clone for TimeTaggedCoords<K> {
    fn clone(&self) -> Self {
        TimeTaggedCoords {
            values: self.values.clone(),
            kind: PhantomData,
        }
    }
}

impl<K: CoordinateKind> PartialEq for TimeTaggedCoords<K> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<K: CoordinateKind> fmt::Debug for TimeTaggedCoords<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeTaggedCoords")
            .field("kind", &K::NAME)
            .field("values", &self.values)
            .finish()
    }
}

impl<K: CoordinateKind> TryFrom<Vec<f64>> for TimeTaggedCoords<K> {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

impl<K: CoordinateKind> Serialize for TimeTaggedCoords<K> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(&self.values)
    }
}

impl<'de, K: CoordinateKind> Deserialize<'de> for TimeTaggedCoords<K> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<f64>::deserialize(deserializer)?;
        Self::new(values).map_err(serde::de::Error::custom)
    }
}
