//! Work record normalization.
//!
//! Library queries return rows with nested structures packed into JSON text
//! columns (`circleObj`, `vaObj`, `tagObj`, …) and flags stored as integers.
//! This crate turns those rows into the records handed to API clients:
//!
//! - [`WorkRow`] is the raw row, decodable via `sqlx` or `serde`.
//! - [`columns`] holds one decoder per serialized column.
//! - [`normalize`] reshapes rows into [`Work`]s, preserving order.
//!
//! Normalization only changes representation; no value is computed or
//! checked beyond what decoding requires.

pub mod columns;
mod date;
pub mod error;
mod models;
mod normalize;
mod row;

pub use crate::date::date_only;
pub use crate::models::{Circle, Tag, VoiceActor, Work};
pub use crate::normalize::{NormalizeOptions, normalize};
pub use crate::row::WorkRow;
