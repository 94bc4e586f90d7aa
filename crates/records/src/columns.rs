//! Serialized column decoders.
//!
//! Each column holding JSON text gets one decoder type: the column name it
//! reads and how its text becomes a structured value. [`WorkRow::normalize`]
//! applies them; nothing else in the crate parses JSON.
//!
//! [`WorkRow::normalize`]: crate::WorkRow::normalize

use exn::ResultExt;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ErrorKind, Result};
use crate::models::{Circle, Tag, VoiceActor};

/// A column whose text is decoded into a structured value.
pub trait JsonColumn {
    /// Column name as selected by the storage layer.
    const NAME: &'static str;
    type Output;

    fn decode(raw: &str) -> Result<Self::Output>;

    /// Decodes a nullable column. `NULL` and the empty string both mean "absent".
    fn decode_nullable(raw: Option<&str>) -> Result<Option<Self::Output>> {
        raw.filter(|raw| !raw.is_empty()).map(Self::decode).transpose()
    }
}

fn parse<T: DeserializeOwned>(column: &'static str, raw: &str) -> Result<T> {
    serde_json::from_str(raw).or_raise(|| ErrorKind::InvalidColumn(column))
}

/// `circleObj` → [`Circle`]
pub struct CircleColumn;
impl JsonColumn for CircleColumn {
    const NAME: &'static str = "circleObj";
    type Output = Circle;
    fn decode(raw: &str) -> Result<Self::Output> {
        parse(Self::NAME, raw)
    }
}

/// `rate_count_detail`, kept as untyped JSON.
pub struct RateDetailColumn;
impl JsonColumn for RateDetailColumn {
    const NAME: &'static str = "rate_count_detail";
    type Output = Value;
    fn decode(raw: &str) -> Result<Self::Output> {
        parse(Self::NAME, raw)
    }
}

/// `rank`, kept as untyped JSON. Nullable.
pub struct RankColumn;
impl JsonColumn for RankColumn {
    const NAME: &'static str = "rank";
    type Output = Value;
    fn decode(raw: &str) -> Result<Self::Output> {
        parse(Self::NAME, raw)
    }
}

#[derive(Deserialize)]
struct VoiceActorList {
    vas: Vec<VoiceActor>,
}

/// `vaObj` → the list inside its `vas` key.
pub struct VoiceActorColumn;
impl JsonColumn for VoiceActorColumn {
    const NAME: &'static str = "vaObj";
    type Output = Vec<VoiceActor>;
    fn decode(raw: &str) -> Result<Self::Output> {
        parse::<VoiceActorList>(Self::NAME, raw).map(|list| list.vas)
    }
}

#[derive(Deserialize)]
struct TagList {
    tags: Vec<Tag>,
}

/// `tagObj` → the list inside its `tags` key.
pub struct TagColumn;
impl JsonColumn for TagColumn {
    const NAME: &'static str = "tagObj";
    type Output = Vec<Tag>;
    fn decode(raw: &str) -> Result<Self::Output> {
        parse::<TagList>(Self::NAME, raw).map(|list| list.tags)
    }
}

/// Every column decoded during normalization.
pub const DECODED_COLUMNS: [&str; 5] = [
    CircleColumn::NAME,
    RateDetailColumn::NAME,
    RankColumn::NAME,
    VoiceActorColumn::NAME,
    TagColumn::NAME,
];

/// Raw columns replaced by a differently-named field, and therefore absent
/// from a normalized record.
pub const REPLACED_COLUMNS: [&str; 3] = [CircleColumn::NAME, VoiceActorColumn::NAME, TagColumn::NAME];
