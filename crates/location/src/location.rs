use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use url::Url;

use crate::error::{Error, ErrorKind};

/// A base location that media fragments are appended to.
///
/// The variant decides the encoding policy of [`join`](crate::join): segments
/// appended to a [`Url`](Self::Url) are percent-encoded, segments appended to
/// a [`FsPath`](Self::FsPath) are kept verbatim.
///
/// Construct through [`FromStr`] so classification happens exactly once:
///
/// ```
/// use kikoeru_location::Location;
/// let cdn: Location = "https://cdn.example.com/media/stream/".parse().unwrap();
/// assert!(cdn.is_url());
/// let local: Location = "/media/stream".parse().unwrap();
/// assert!(!local.is_url());
/// let windows: Location = "C:\\VoiceWork".parse().unwrap();
/// assert!(!windows.is_url());
/// assert!("".parse::<Location>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    /// Absolute URL with an authority, e.g. an offload CDN.
    Url(String),
    /// Local filesystem path, POSIX or Windows style.
    FsPath(String),
}
impl Location {
    pub fn is_url(&self) -> bool {
        matches!(self, Self::Url(_))
    }

    /// The location as configured. Filesystem paths are verbatim; URLs have
    /// surrounding whitespace removed.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Url(s) | Self::FsPath(s) => s.as_str(),
        }
    }

    /// Appends fragments to this location; see [`join`](crate::join).
    pub fn join<I, S>(&self, fragments: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        crate::join::join(self, fragments)
    }
}

/// `scheme://…` only. Drive letters (`C:\`, `C:/`) parse as a one-letter
/// scheme but have no authority, so they stay filesystem paths.
///
/// Leading and trailing spaces and control characters are ignored, the same
/// as the URL parser does; the URL is returned without them.
fn absolute_url(s: &str) -> Option<&str> {
    let trimmed = s.trim_matches(|c: char| c == ' ' || c.is_ascii_control());
    Url::parse(trimmed)
        .is_ok_and(|url| trimmed.get(url.scheme().len()..).is_some_and(|rest| rest.starts_with("://")))
        .then_some(trimmed)
}

impl FromStr for Location {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            exn::bail!(ErrorKind::EmptyBase);
        }
        Ok(match absolute_url(s) {
            Some(url) => Self::Url(url.to_string()),
            None => Self::FsPath(s.to_string()),
        })
    }
}
impl TryFrom<String> for Location {
    type Error = Error;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.as_str().parse()
    }
}
impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
impl<'de> Deserialize<'de> for Location {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(|err: Error| {
            let kind: &ErrorKind = &err;
            serde::de::Error::custom(kind)
        })
    }
}
