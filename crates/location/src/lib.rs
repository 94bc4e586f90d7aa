//! Media location composition.
//!
//! Turns a work's stored coordinates (root folder, work directory, optional
//! subfolder, file name) into the string a route handler serves from: either
//! a local filesystem path or an absolute URL on an offload target.
//!
//! - [`Location`] classifies a configured base once, as URL or filesystem path.
//! - [`join`] appends fragments, normalising `/` and `\` separators and
//!   percent-encoding segments only when the base is a URL.
//! - [`MediaLocator`] picks the base (root folder or offload target) for a track.

pub mod error;
mod join;
mod location;
mod media;
mod segment;

pub use crate::join::join;
pub use crate::location::Location;
pub use crate::media::{MediaKind, MediaLocator, Offload, Resolved, RootFolder, TrackRef};
pub use crate::segment::{SEPARATORS, encode_segment, segments};
