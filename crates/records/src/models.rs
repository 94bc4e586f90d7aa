use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Declares a nested record that is carried exactly as the storage layer
/// built it. Keys beyond `id` and `name` and `null` members (left joins with
/// no match) all survive untouched.
macro_rules! passthrough_record {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Value);

        impl $name {
            pub fn id(&self) -> Option<&Value> {
                self.0.get("id").filter(|id| !id.is_null())
            }

            pub fn name(&self) -> Option<&str> {
                self.0.get("name").and_then(Value::as_str)
            }

            pub fn into_inner(self) -> Value {
                self.0
            }
        }
        impl From<Value> for $name {
            fn from(value: Value) -> Self {
                Self(value)
            }
        }
    };
}

passthrough_record!(
    /// The circle (publisher) that released a work.
    Circle
);
passthrough_record!(
    /// A voice actor credited on a work. Identifiers are UUID strings.
    VoiceActor
);
passthrough_record!(
    /// A tag applied to a work.
    Tag
);

/// A work record in the shape returned to API clients.
///
/// Produced from a [`WorkRow`](crate::WorkRow) by
/// [`normalize`](crate::normalize). The rating distribution and sales rank
/// history are passed through as structured JSON without interpretation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Work {
    pub id: i64,
    pub title: String,
    pub circle_id: i64,
    /// Circle name, when the query selects it alongside `circleObj`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub release: String,
    pub dl_count: i64,
    pub price: i64,
    pub review_count: i64,
    pub rate_count: i64,
    pub rate_average_2dp: f64,
    pub nsfw: bool,
    pub circle: Circle,
    pub rate_count_detail: Value,
    /// `None` for works that never charted; serialized as `null`.
    pub rank: Option<Value>,
    pub vas: Vec<VoiceActor>,
    pub tags: Vec<Tag>,
    #[serde(rename = "userRating", skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// Columns carried over from the row unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
