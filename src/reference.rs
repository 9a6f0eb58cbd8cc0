//! References to a property of another packet, written `id#property`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated `id#property` reference.
///
/// The string is split at the first `#`, so property paths may themselves
/// contain `#`.
///
/// # Examples
///
/// ```rust
/// use czml_types::ReferenceValue;
///
/// let r = ReferenceValue::new("satellite#position").unwrap();
/// assert_eq!(r.id(), "satellite");
/// assert_eq!(r.property(), "position");
///
/// assert!(ReferenceValue::new("satellite").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReferenceValue {
    reference: String,
    split: usize,
}

impl ReferenceValue {
    /// # Errors
    ///
    /// Returns [`Error::InvalidReference`] if there is no `#`, or if the id or
    /// property part is empty.
    pub fn new(reference: impl Into<String>) -> Result<Self> {
        let reference = reference.into();
        match reference.find('#') {
            Some(split) if split > 0 && split + 1 < reference.len() => {
                Ok(ReferenceValue { reference, split })
            }
            _ => {
                log::debug!("rejected reference of {} bytes", reference.len());
                Err(Error::invalid_reference(&reference))
            }
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.reference[..self.split]
    }

    #[must_use]
    pub fn property(&self) -> &str {
        &self.reference[self.split + 1..]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.reference
    }
}

impl TryFrom<String> for ReferenceValue {
    type Error = Error;

    fn try_from(reference: String) -> Result<Self> {
        Self::new(reference)
    }
}

impl From<ReferenceValue> for String {
    fn from(value: ReferenceValue) -> Self {
        value.reference
    }
}

impl FromStr for ReferenceValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for ReferenceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reference)
    }
}
