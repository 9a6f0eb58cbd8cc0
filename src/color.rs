//! Color values.
//!
//! Colors follow the same plain-or-time-tagged layout as coordinates, with four
//! components (red, green, blue, alpha):
//!
//! - [`RgbaValue`]: integer components in `0..=255`
//! - [`RgbafValue`]: float components in `0.0..=1.0`
//!
//! Only the color components are range checked; time tags are stored as given.

use crate::coords::check_layout;
use crate::error::{Error, Result};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const NUM_COMPONENTS: usize = 4;

/// Yields every color component, skipping time tags.
fn components(values: &[f64]) -> impl Iterator<Item = f64> + '_ {
    let tagged = values.len() != NUM_COMPONENTS;
    values
        .iter()
        .enumerate()
        .filter(move |(i, _)| !tagged || i % (NUM_COMPONENTS + 1) != 0)
        .map(|(_, v)| *v)
}

/// Integer RGBA color, optionally time-tagged.
///
/// # Examples
///
/// ```rust
/// use czml_types::{Error, RgbaValue};
///
/// let red = RgbaValue::new(vec![255.0, 0.0, 0.0, 255.0]).unwrap();
/// assert_eq!(serde_json::to_string(&red).unwrap(), "[255,0,0,255]");
///
/// let err = RgbaValue::new(vec![256.0, 0.0, 0.0, 255.0]).unwrap_err();
/// assert_eq!(err, Error::InvalidRgba);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaValue {
    values: Vec<f64>,
}

impl RgbaValue {
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] for a bad layout and
    /// [`Error::InvalidRgba`] for a component that is not an integer in `0..=255`.
    pub fn new(values: impl Into<Vec<f64>>) -> Result<Self> {
        let values = values.into();
        check_layout(values.len(), NUM_COMPONENTS, "rgba")?;
        if !components(&values).all(|v| v.fract() == 0.0 && (0.0..=255.0).contains(&v)) {
            log::debug!("rejected rgba value with out-of-range component");
            return Err(Error::InvalidRgba);
        }
        Ok(RgbaValue { values })
    }

    /// Builds a single untagged color.
    #[must_use]
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        RgbaValue {
            values: vec![f64::from(r), f64::from(g), f64::from(b), f64::from(a)],
        }
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn is_time_tagged(&self) -> bool {
        self.values.len() != NUM_COMPONENTS
    }
}

impl TryFrom<Vec<f64>> for RgbaValue {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

impl Serialize for RgbaValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let tagged = self.is_time_tagged();
        let mut seq = serializer.serialize_seq(Some(self.values.len()))?;
        for (i, v) in self.values.iter().enumerate() {
            if tagged && i % (NUM_COMPONENTS + 1) == 0 {
                seq.serialize_element(v)?;
            } else {
                // Range was checked at construction.
                seq.serialize_element(&(*v as u8))?;
            }
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for RgbaValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<f64>::deserialize(deserializer)?;
        Self::new(values).map_err(serde::de::Error::custom)
    }
}

/// Floating-point RGBA color, optionally time-tagged.
///
/// # Examples
///
/// ```rust
/// use czml_types::RgbafValue;
///
/// assert!(RgbafValue::new(vec![1.0, 0.5, 0.0, 1.0]).is_ok());
/// assert!(RgbafValue::new(vec![1.5, 0.5, 0.0, 1.0]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RgbafValue {
    values: Vec<f64>,
}

impl RgbafValue {
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] for a bad layout and
    /// [`Error::InvalidRgbaf`] for a component outside `0.0..=1.0`.
    pub fn new(values: impl Into<Vec<f64>>) -> Result<Self> {
        let values = values.into();
        check_layout(values.len(), NUM_COMPONENTS, "rgbaf")?;
        if !components(&values).all(|v| (0.0..=1.0).contains(&v)) {
            log::debug!("rejected rgbaf value with out-of-range component");
            return Err(Error::InvalidRgbaf);
        }
        Ok(RgbafValue { values })
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn is_time_tagged(&self) -> bool {
        self.values.len() != NUM_COMPONENTS
    }
}

impl TryFrom<Vec<f64>> for RgbafValue {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

impl Serialize for RgbafValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(&self.values)
    }
}

impl<'de> Deserialize<'de> for RgbafValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<f64>::deserialize(deserializer)?;
        Self::new(values).map_err(serde::de::Error::custom)
    }
}
