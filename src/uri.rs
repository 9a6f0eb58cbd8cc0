//! Resource locators: network URLs and `data:` URIs.
//!
//! A [`Uri`] accepts exactly two grammars:
//!
//! - **URL**: `scheme://authority[/path][?query][#fragment]`, any scheme.
//!   The authority is an optional `userinfo@`, a host (name, IPv4 or bracketed
//!   IPv6) and an optional `:port`. `scheme:///path` is accepted for local
//!   resources.
//! - **Data URI**: `data:[type/subtype][;attr=value]*[;base64],payload`. A
//!   base64 payload must decode as standard base64; padding is optional.
//!
//! Relative references and bare words are rejected. Accepted strings are kept
//! verbatim.
//!
//! ## Examples
//!
//! ```rust
//! use czml_types::{Uri, UriKind};
//!
//! let model = Uri::new("https://example.com/models/satellite.gltf").unwrap();
//! assert_eq!(model.kind(), UriKind::Url);
//!
//! let image = Uri::new("data:image/png;base64,iVBORw0KGgo=").unwrap();
//! assert_eq!(image.media_type(), Some("image/png"));
//!
//! let err = Uri::new("a").unwrap_err();
//! assert_eq!(err.to_string(), "uri must be a URL or a data URI");
//! ```

use crate::error::{Error, Result};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z][A-Za-z0-9+.\-]*://",
        r"(?:(?:[^\s/?#@\[\]]*@)?(?:\[[0-9A-Fa-f:.]+\]|[^\s/?#:@\[\]]+)(?::\d*)?(?:/[^\s?#]*)?",
        r"|/[^\s?#]*)",
        r"(?:\?[^\s#]*)?",
        r"(?:#\S*)?$",
    ))
    .expect("valid url regex")
});

static DATA_URI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?i:data):",
        r"(?P<media>[A-Za-z0-9!#$&^_.+\-]+/[A-Za-z0-9!#$&^_.+\-]+)?",
        r"(?:;[A-Za-z0-9!#$&^_.+\-]+=[^;,\s]*)*",
        r"(?P<base64>;base64)?",
        r",(?P<data>\S*)$",
    ))
    .expect("valid data uri regex")
});

/// Standard alphabet; accepts payloads with or without canonical padding.
const BASE64_PAYLOAD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Which grammar a [`Uri`] matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UriKind {
    Url,
    Data,
}

/// A validated URL or data URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Uri {
    uri: String,
    kind: UriKind,
}

fn classify(uri: &str) -> Option<UriKind> {
    if let Some(caps) = DATA_URI_RE.captures(uri) {
        let payload = caps.name("data").map_or("", |m| m.as_str());
        if caps.name("base64").is_some() && BASE64_PAYLOAD.decode(payload).is_err() {
            return None;
        }
        return Some(UriKind::Data);
    }
    if URL_RE.is_match(uri) {
        return Some(UriKind::Url);
    }
    None
}

impl Uri {
    /// Validates `uri` against the URL and data URI grammars.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUri`] if neither grammar matches.
    pub fn new(uri: impl Into<String>) -> Result<Self> {
        let uri = uri.into();
        match classify(&uri) {
            Some(kind) => Ok(Uri { uri, kind }),
            None => {
                log::debug!("rejected uri of {} bytes", uri.len());
                Err(Error::invalid_uri(&uri))
            }
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.uri
    }

    #[must_use]
    pub fn kind(&self) -> UriKind {
        self.kind
    }

    #[must_use]
    pub fn is_data(&self) -> bool {
        self.kind == UriKind::Data
    }

    /// The `type/subtype` of a data URI, if one was given.
    #[must_use]
    pub fn media_type(&self) -> Option<&str> {
        if !self.is_data() {
            return None;
        }
        DATA_URI_RE
            .captures(&self.uri)
            .and_then(|caps| caps.name("media"))
            .map(|m| m.as_str())
    }

    /// Returns `true` for a data URI carrying a base64 payload.
    #[must_use]
    pub fn is_base64(&self) -> bool {
        self.is_data()
            && DATA_URI_RE
                .captures(&self.uri)
                .is_some_and(|caps| caps.name("base64").is_some())
    }

    /// The payload after the comma of a data URI.
    #[must_use]
    pub fn data(&self) -> Option<&str> {
        if !self.is_data() {
            return None;
        }
        DATA_URI_RE
            .captures(&self.uri)
            .and_then(|caps| caps.name("data"))
            .map(|m| m.as_str())
    }
}

impl TryFrom<String> for Uri {
    type Error = Error;

    fn try_from(uri: String) -> Result<Self> {
        Self::new(uri)
    }
}

impl From<Uri> for String {
    fn from(uri: Uri) -> Self {
        uri.uri
    }
}

impl FromStr for Uri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_accepted() {
        for url in [
            "https://example.com",
            "http://localhost:8080/tiles/0/0/0.png?token=abc#frag",
            "ftp://user:pw@files.example.org/pub/model.glb",
            "http://192.168.0.1/",
            "http://[::1]:3000/scene.czml",
            "file:///home/user/model.gltf",
            "s3://bucket/key",
        ] {
            let uri = Uri::new(url).unwrap();
            assert_eq!(uri.kind(), UriKind::Url, "{url}");
            assert_eq!(uri.as_str(), url);
        }
    }

    #[test]
    fn test_data_uris_accepted() {
        let plain = Uri::new("data:,Hello%2C%20World!").unwrap();
        assert_eq!(plain.kind(), UriKind::Data);
        assert_eq!(plain.media_type(), None);
        assert!(!plain.is_base64());
        assert_eq!(plain.data(), Some("Hello%2C%20World!"));

        let text = Uri::new("data:text/plain;charset=US-ASCII,hello").unwrap();
        assert_eq!(text.media_type(), Some("text/plain"));

        let png = Uri::new("DATA:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAUA").unwrap();
        assert!(png.is_base64());

        for payload in ["SGVsbG8=", "SGVsbG8", "SGk=", "SGk", ""] {
            let uri = format!("data:text/plain;base64,{payload}");
            assert!(Uri::new(uri.as_str()).is_ok(), "{uri}");
        }
    }

    #[test]
    fn test_rejected() {
        for bad in [
            "a",
            "",
            "example.com/path",
            "/relative/path",
            "http://",
            "http://exa mple.com",
            "data:image/png;base64",
            "data:image/png;base64,not base64!",
            "data:;base64,@@@",
            "data:;base64,A",
            "data:text/plain;base64,AB=",
            "data:text/plain;base64,ABCDE",
        ] {
            assert_eq!(Uri::new(bad).unwrap_err(), Error::invalid_uri(bad), "{bad}");
        }
    }

    #[test]
    fn test_url_accessors_are_empty() {
        let uri = Uri::new("https://example.com/a.png").unwrap();
        assert_eq!(uri.media_type(), None);
        assert_eq!(uri.data(), None);
        assert!(!uri.is_base64());
    }

    #[test]
    fn test_serde_revalidates() {
        let uri: Uri = serde_json::from_str("\"https://example.com\"").unwrap();
        assert_eq!(serde_json::to_string(&uri).unwrap(), "\"https://example.com\"");
        assert!(serde_json::from_str::<Uri>("\"a\"").is_err());
    }
}
