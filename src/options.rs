//! Configuration options for rendering values as JSON.
//!
//! Values are usually embedded in a larger document, so the default output is
//! compact. Pretty output is available for debugging and golden files.
//!
//! ## Examples
//!
//! ```rust
//! use czml_types::{to_string_with_options, Cartesian3Value, JsonOptions};
//!
//! let point = Cartesian3Value::new(vec![1.0, 2.0, 3.0]).unwrap();
//!
//! let compact = to_string_with_options(&point, JsonOptions::new()).unwrap();
//! assert_eq!(compact, "[1.0,2.0,3.0]");
//!
//! let pretty = to_string_with_options(&point, JsonOptions::pretty().with_indent(4)).unwrap();
//! assert!(pretty.contains("\n    1.0"));
//! ```

/// Configuration options for JSON rendering.
///
/// # Examples
///
/// ```rust
/// use czml_types::JsonOptions;
///
/// // Default compact options
/// let options = JsonOptions::new();
/// assert!(!options.pretty);
///
/// // Pretty-printed with 2-space indentation
/// let options = JsonOptions::pretty();
/// assert_eq!(options.indent, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonOptions {
    pub indent: usize,
    pub pretty: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        JsonOptions {
            indent: 2,
            pretty: false,
        }
    }
}

impl JsonOptions {
    /// Creates default options (compact, 2-space indent when pretty).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for pretty-printed output with newlines and indentation.
    #[must_use]
    pub fn pretty() -> Self {
        JsonOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per level).
    ///
    /// Only affects pretty-printed output.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub(crate) fn indent_bytes(&self) -> Vec<u8> {
        vec![b' '; self.indent]
    }
}
