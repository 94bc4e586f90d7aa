//! Resolving a track to the location it is served from.
//!
//! A track lives under one of the configured root folders. When media offload
//! is enabled, streams and downloads are redirected to an external target
//! (typically a CDN mirroring the root folders by name); otherwise the file is
//! read from the root folder on local disk.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use tracing::{debug, instrument};

use crate::error::{ErrorKind, Result};
use crate::location::Location;

/// A named library root, e.g. `VoiceWork` → `/srv/VoiceWork`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootFolder {
    pub name: String,
    pub path: Location,
}

/// What the caller intends to do with the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Stream,
    Download,
}

/// Offload targets, one per [`MediaKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offload {
    pub stream: Location,
    pub download: Location,
}
impl Offload {
    pub fn base(&self, kind: MediaKind) -> &Location {
        match kind {
            MediaKind::Stream => &self.stream,
            MediaKind::Download => &self.download,
        }
    }
}

/// The stored coordinates of a single track.
///
/// `work_dir` and `subfolder` come straight from the scanner and may use
/// either separator style; `subfolder` is empty for tracks at the top of a work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackRef<'a> {
    pub root_folder: &'a str,
    pub work_dir: &'a str,
    pub subfolder: &'a str,
    pub title: &'a str,
}

/// Where a track should be served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Read from local disk.
    Local(String),
    /// Redirect or proxy to the offload target.
    Offload(String),
}
impl Resolved {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Local(s) | Self::Offload(s) => s.as_str(),
        }
    }

    pub fn is_offload(&self) -> bool {
        matches!(self, Self::Offload(_))
    }
}
impl Display for Resolved {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Maps [`TrackRef`]s to serving locations using explicit configuration.
///
/// ```
/// use kikoeru_location::{MediaKind, MediaLocator, Offload, Resolved, RootFolder, TrackRef};
/// let locator = MediaLocator::new([RootFolder {
///     name: "VoiceWork".to_string(),
///     path: "/srv/VoiceWork".parse().unwrap(),
/// }]);
/// let track = TrackRef { root_folder: "VoiceWork", work_dir: "RJ157474", subfolder: "", title: "t4.mp3" };
/// assert_eq!(
///     locator.resolve(MediaKind::Stream, &track).unwrap(),
///     Resolved::Local("/srv/VoiceWork/RJ157474/t4.mp3".to_string()),
/// );
///
/// let locator = locator.with_offload(Offload {
///     stream: "https://cdn.example.com/media/stream/".parse().unwrap(),
///     download: "https://cdn.example.com/media/download/".parse().unwrap(),
/// });
/// assert_eq!(
///     locator.resolve(MediaKind::Download, &track).unwrap().as_str(),
///     "https://cdn.example.com/media/download/VoiceWork/RJ157474/t4.mp3",
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaLocator {
    roots: Vec<RootFolder>,
    offload: Option<Offload>,
}
impl MediaLocator {
    pub fn new(roots: impl IntoIterator<Item = RootFolder>) -> Self {
        Self {
            roots: roots.into_iter().collect(),
            offload: None,
        }
    }

    /// Enables (or, with `None`, disables) offloading.
    pub fn with_offload(mut self, offload: impl Into<Option<Offload>>) -> Self {
        self.offload = offload.into();
        self
    }

    pub fn root(&self, name: &str) -> Option<&RootFolder> {
        self.roots.iter().find(|root| root.name == name)
    }

    pub fn offload(&self) -> Option<&Offload> {
        self.offload.as_ref()
    }

    /// Resolves a track to its serving location.
    ///
    /// The root folder must be configured even when offloading, since the
    /// offload target mirrors the library by root folder name.
    #[instrument(level = "debug", skip(self), fields(offload = self.offload.is_some()))]
    pub fn resolve(&self, kind: MediaKind, track: &TrackRef<'_>) -> Result<Resolved> {
        let Some(root) = self.root(track.root_folder) else {
            exn::bail!(ErrorKind::UnknownRootFolder(track.root_folder.to_string()));
        };
        let resolved = match &self.offload {
            Some(offload) => Resolved::Offload(offload.base(kind).join([
                root.name.as_str(),
                track.work_dir,
                track.subfolder,
                track.title,
            ])),
            None => Resolved::Local(root.path.join([track.work_dir, track.subfolder, track.title])),
        };
        debug!(%resolved, "resolved track location");
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn locator() -> MediaLocator {
        MediaLocator::new([
            RootFolder {
                name: "VoiceWork".to_string(),
                path: "/srv/VoiceWork/".parse().unwrap(),
            },
            RootFolder {
                name: "Archive".to_string(),
                path: "D:\\Archive".parse().unwrap(),
            },
        ])
    }

    fn offload() -> Offload {
        Offload {
            stream: "https://cdn.example.com/media/stream/".parse().unwrap(),
            download: "/media/download".parse().unwrap(),
        }
    }

    const TRACK: TrackRef<'static> = TrackRef {
        root_folder: "VoiceWork",
        work_dir: "second\\RJ290139",
        subfolder: "mp3",
        title: "01 はじめに?.mp3",
    };

    #[rstest]
    #[case(MediaKind::Stream)]
    #[case(MediaKind::Download)]
    fn test_local(#[case] kind: MediaKind) {
        let resolved = locator().resolve(kind, &TRACK).unwrap();
        assert_eq!(resolved, Resolved::Local("/srv/VoiceWork/second/RJ290139/mp3/01 はじめに?.mp3".to_string()));
        assert!(!resolved.is_offload());
    }

    #[test]
    fn test_local_windows_root() {
        let track = TrackRef { root_folder: "Archive", ..TRACK };
        let resolved = locator().resolve(MediaKind::Stream, &track).unwrap();
        assert_eq!(resolved.as_str(), "D:\\Archive/second/RJ290139/mp3/01 はじめに?.mp3");
    }

    #[rstest]
    #[case(
        MediaKind::Stream,
        "https://cdn.example.com/media/stream/VoiceWork/second/RJ290139/mp3/01%20%E3%81%AF%E3%81%98%E3%82%81%E3%81%AB%3F.mp3"
    )]
    #[case(MediaKind::Download, "/media/download/VoiceWork/second/RJ290139/mp3/01 はじめに?.mp3")]
    fn test_offload(#[case] kind: MediaKind, #[case] expected: &str) {
        let resolved = locator().with_offload(offload()).resolve(kind, &TRACK).unwrap();
        assert_eq!(resolved, Resolved::Offload(expected.to_string()));
    }

    #[test]
    fn test_offload_can_be_disabled_again() {
        let locator = locator().with_offload(offload()).with_offload(None);
        assert!(locator.offload().is_none());
        assert!(!locator.resolve(MediaKind::Stream, &TRACK).unwrap().is_offload());
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn test_unknown_root_folder(#[case] offloaded: bool) {
        let locator = match offloaded {
            true => locator().with_offload(offload()),
            false => locator(),
        };
        let track = TrackRef { root_folder: "Missing", ..TRACK };
        let err = locator.resolve(MediaKind::Stream, &track).unwrap_err();
        assert_eq!(*err, ErrorKind::UnknownRootFolder("Missing".to_string()));
    }
}
