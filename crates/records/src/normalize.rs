use tracing::{debug, instrument, warn};

use crate::columns::{CircleColumn, JsonColumn, RankColumn, RateDetailColumn, TagColumn, VoiceActorColumn};
use crate::date::date_only;
use crate::error::{Error, ErrorKind, Result};
use crate::models::Work;
use crate::row::WorkRow;

/// Options for [`normalize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Reduce `updated_at` to its calendar date.
    pub date_only: bool,
}
impl NormalizeOptions {
    pub fn with_date_only(mut self, date_only: bool) -> Self {
        self.date_only = date_only;
        self
    }
}

impl WorkRow {
    /// Reshapes a single row into its API representation.
    ///
    /// Fails if any serialized column is malformed; the row is never partially
    /// normalized or filled with defaults.
    pub fn normalize(self, options: &NormalizeOptions) -> Result<Work> {
        let updated_at = match self.updated_at {
            Some(timestamp) if options.date_only && !timestamp.is_empty() => Some(date_only(&timestamp)?),
            updated_at => updated_at,
        };
        Ok(Work {
            id: self.id,
            title: self.title,
            circle_id: self.circle_id,
            name: self.name,
            release: self.release,
            dl_count: self.dl_count,
            price: self.price,
            review_count: self.review_count,
            rate_count: self.rate_count,
            rate_average_2dp: self.rate_average_2dp,
            nsfw: self.nsfw != 0,
            circle: CircleColumn::decode(&self.circle_obj)?,
            rate_count_detail: RateDetailColumn::decode(&self.rate_count_detail)?,
            rank: RankColumn::decode_nullable(self.rank.as_deref())?,
            vas: VoiceActorColumn::decode(&self.va_obj)?,
            tags: TagColumn::decode(&self.tag_obj)?,
            user_rating: self.user_rating,
            review_text: self.review_text,
            progress: self.progress,
            updated_at,
            user_name: self.user_name,
            extra: self.extra,
        })
    }
}

impl TryFrom<WorkRow> for Work {
    type Error = Error;
    fn try_from(row: WorkRow) -> std::result::Result<Self, Self::Error> {
        row.normalize(&NormalizeOptions::default())
    }
}

/// Normalizes storage rows into API records, preserving order and count.
///
/// Stops at the first malformed row: a broken serialized column means the
/// storage layer is corrupt, and the whole request should fail.
///
/// ```
/// use kikoeru_records::{NormalizeOptions, WorkRow, normalize};
/// let row = WorkRow {
///     nsfw: 1,
///     circle_obj: r#"{"id":1,"name":"X"}"#.to_string(),
///     rate_count_detail: "{}".to_string(),
///     va_obj: r#"{"vas":[]}"#.to_string(),
///     tag_obj: r#"{"tags":[]}"#.to_string(),
///     ..WorkRow::default()
/// };
/// let works = normalize([row], &NormalizeOptions::default()).unwrap();
/// assert!(works[0].nsfw);
/// assert_eq!(works[0].circle.name(), Some("X"));
/// assert!(works[0].rank.is_none());
/// ```
#[instrument(skip_all, fields(date_only = options.date_only))]
pub fn normalize<I>(rows: I, options: &NormalizeOptions) -> Result<Vec<Work>>
where
    I: IntoIterator<Item = WorkRow>,
{
    let works = rows
        .into_iter()
        .map(|row| {
            let id = row.id;
            row.normalize(options).inspect_err(|err| {
                let kind: &ErrorKind = err;
                warn!(work_id = id, %kind, "failed to normalize work row");
            })
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(count = works.len(), "normalized work rows");
    Ok(works)
}
