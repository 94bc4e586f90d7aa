//! Configuration loading and validation.
//!
//! Configuration is layered with [figment], later sources overriding earlier
//! ones:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. A configuration file: TOML, or YAML/JSON by extension. Without an
//!    explicit path, `config.toml` in the platform config directory is used
//!    when it exists.
//! 3. Environment variables prefixed with `KIKOERU_`, e.g.
//!    `KIKOERU_OFFLOAD_MEDIA=true`.
//!
//! Keys written in camelCase (`rootFolders`, `offloadMedia`, …), as found in
//! existing kikoeru `config.json` files, are renamed as the file is read, so
//! environment overrides still apply on top of them.
//!
//! The result is a plain value: nothing here is global, and consumers get
//! their media bases from [`Config::media_locator`].
//!
//! ```toml
//! offload_media = true
//! offload_stream_path = "https://cdn.example.com/media/stream/"
//! offload_download_path = "https://cdn.example.com/media/download/"
//!
//! [[root_folders]]
//! name = "VoiceWork"
//! path = "/srv/VoiceWork"
//! ```

pub mod error;

use directories::ProjectDirs;
use exn::ResultExt;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use figment::value::{Dict, Map};
use figment::{Figment, Metadata, Profile, Provider};
use kikoeru_location::{Location, MediaLocator, Offload, RootFolder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::error::{ErrorKind, Result};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "KIKOERU_";
/// File name looked up in the platform config directory.
pub const DEFAULT_FILE_NAME: &str = "config.toml";
pub const DEFAULT_OFFLOAD_STREAM_PATH: &str = "/media/stream/";
pub const DEFAULT_OFFLOAD_DOWNLOAD_PATH: &str = "/media/download/";

/// camelCase keys written by earlier kikoeru releases, and their current names.
const LEGACY_KEYS: [(&str, &str); 4] = [
    ("rootFolders", "root_folders"),
    ("offloadMedia", "offload_media"),
    ("offloadStreamPath", "offload_stream_path"),
    ("offloadDownloadPath", "offload_download_path"),
];

/// Renames [`LEGACY_KEYS`] in the wrapped provider's data. A current key
/// present in the same file wins over its legacy spelling.
struct LegacyKeys<P>(P);
impl<P: Provider> Provider for LegacyKeys<P> {
    fn metadata(&self) -> Metadata {
        self.0.metadata()
    }

    fn data(&self) -> std::result::Result<Map<Profile, Dict>, figment::Error> {
        let mut data = self.0.data()?;
        for dict in data.values_mut() {
            for (legacy, current) in LEGACY_KEYS {
                if let Some(value) = dict.remove(legacy) {
                    dict.entry(current.to_string()).or_insert(value);
                }
            }
        }
        Ok(data)
    }

    fn profile(&self) -> Option<Profile> {
        self.0.profile()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Library roots, looked up by name when resolving a track.
    pub root_folders: Vec<RootFolder>,
    /// Serve media from the offload paths instead of local disk.
    pub offload_media: bool,
    /// Base for offloaded streams, e.g. `/media/stream/` behind a reverse
    /// proxy or an absolute CDN URL.
    pub offload_stream_path: Location,
    /// Base for offloaded downloads.
    pub offload_download_path: Location,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            root_folders: Vec::new(),
            offload_media: false,
            offload_stream_path: Location::FsPath(DEFAULT_OFFLOAD_STREAM_PATH.to_string()),
            offload_download_path: Location::FsPath(DEFAULT_OFFLOAD_DOWNLOAD_PATH.to_string()),
        }
    }
}
impl Config {
    /// `config.toml` in the platform config directory, if one can be determined.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "kikoeru").map(|dirs| dirs.config_dir().join(DEFAULT_FILE_NAME))
    }

    /// Builds the layered provider without extracting it.
    pub fn figment(file: Option<&Path>) -> Figment {
        let figment = Figment::from(Serialized::defaults(Config::default()));
        let figment = match file {
            Some(path) => match path.extension().and_then(OsStr::to_str) {
                Some("yaml" | "yml") => figment.merge(LegacyKeys(Yaml::file(path))),
                Some("json") => figment.merge(LegacyKeys(Json::file(path))),
                _ => figment.merge(LegacyKeys(Toml::file(path))),
            },
            None => figment,
        };
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads and validates configuration.
    ///
    /// An explicit `file` must exist. Without one, the [default
    /// path](Self::default_path) is used only if present.
    #[instrument(level = "debug")]
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let file = match file {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::Load),
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|path| path.is_file()),
        };
        debug!(file = ?file, "loading configuration");
        let config: Self = Self::figment(file.as_deref()).extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for root in &self.root_folders {
            if root.name.trim().is_empty() {
                exn::bail!(ErrorKind::EmptyRootFolderName);
            }
            if !seen.insert(root.name.as_str()) {
                exn::bail!(ErrorKind::DuplicateRootFolder(root.name.clone()));
            }
        }
        Ok(())
    }

    pub fn offload(&self) -> Option<Offload> {
        self.offload_media.then(|| Offload {
            stream: self.offload_stream_path.clone(),
            download: self.offload_download_path.clone(),
        })
    }

    pub fn media_locator(&self) -> MediaLocator {
        MediaLocator::new(self.root_folders.iter().cloned()).with_offload(self.offload())
    }
}
