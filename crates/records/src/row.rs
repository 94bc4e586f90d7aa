use serde::Deserialize;
use serde_json::{Map, Value};

/// A work row as returned by the storage layer.
///
/// Nested structures arrive as JSON text built by the query itself
/// (`json_object(...)`, `json_group_array(...)`), and `nsfw` as an integer
/// flag. Review columns are only present in queries joined against a user's
/// reviews and default to `None` elsewhere.
///
/// Decodable from a sqlx row or from a JSON object with the same column names.
/// A JSON object may carry further columns; they land in `extra` and pass
/// through normalization untouched. A sqlx row only yields the columns
/// declared here, anything else it selects is ignored.
#[derive(Debug, Clone, Default, PartialEq, sqlx::FromRow, Deserialize)]
#[serde(default)]
pub struct WorkRow {
    pub id: i64,
    pub title: String,
    #[sqlx(default)]
    pub circle_id: i64,
    /// Circle name, selected next to `circleObj` by the work listing queries.
    #[sqlx(default)]
    pub name: Option<String>,
    #[sqlx(default)]
    pub release: String,
    #[sqlx(default)]
    pub dl_count: i64,
    #[sqlx(default)]
    pub price: i64,
    #[sqlx(default)]
    pub review_count: i64,
    #[sqlx(default)]
    pub rate_count: i64,
    #[sqlx(default)]
    pub rate_average_2dp: f64,
    pub nsfw: i64,
    /// `{"id": …, "name": …}`
    #[sqlx(rename = "circleObj")]
    #[serde(rename = "circleObj")]
    pub circle_obj: String,
    /// Rating distribution; passed through as-is.
    pub rate_count_detail: String,
    /// Sales rank history; `NULL` for works that never charted.
    #[sqlx(default)]
    pub rank: Option<String>,
    /// `{"vas": [{"id": …, "name": …}, …]}`
    #[sqlx(rename = "vaObj")]
    #[serde(rename = "vaObj")]
    pub va_obj: String,
    /// `{"tags": [{"id": …, "name": …}, …]}`
    #[sqlx(rename = "tagObj")]
    #[serde(rename = "tagObj")]
    pub tag_obj: String,
    #[sqlx(rename = "userRating", default)]
    #[serde(rename = "userRating")]
    pub user_rating: Option<i64>,
    #[sqlx(default)]
    pub review_text: Option<String>,
    #[sqlx(default)]
    pub progress: Option<String>,
    #[sqlx(default)]
    pub updated_at: Option<String>,
    #[sqlx(default)]
    pub user_name: Option<String>,
    #[sqlx(skip)]
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::{Connection, SqliteConnection};

    const SELECT_WORK: &str = r#"
        SELECT 443489 AS id,
            'ずっとそばにいてくれる' AS title,
            1 AS circle_id,
            'Circle' AS name,
            json_object('id', 1, 'name', 'Circle') AS circleObj,
            1 AS nsfw,
            '2022-03-01' AS release,
            1024 AS dl_count,
            880 AS price,
            12 AS review_count,
            40 AS rate_count,
            4.55 AS rate_average_2dp,
            json_array(json_object('review_point', 5, 'count', 30, 'ratio', 75)) AS rate_count_detail,
            NULL AS rank,
            json_object('vas', json_array(json_object('id', 'b2b6a0a4', 'name', 'VA'))) AS vaObj,
            json_object('tags', json_array()) AS tagObj
    "#;

    #[tokio::test]
    async fn test_decode_sqlite_row() {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
        let row: WorkRow = sqlx::query_as(SELECT_WORK).fetch_one(&mut conn).await.unwrap();
        assert_eq!(row.id, 443489);
        assert_eq!(row.nsfw, 1);
        assert_eq!(row.circle_obj, r#"{"id":1,"name":"Circle"}"#);
        assert_eq!(row.va_obj, r#"{"vas":[{"id":"b2b6a0a4","name":"VA"}]}"#);
        assert_eq!(row.tag_obj, r#"{"tags":[]}"#);
        assert_eq!(row.rank, None);
        assert_eq!(row.name.as_deref(), Some("Circle"));
        // Review columns were not selected.
        assert_eq!(row.user_rating, None);
        assert_eq!(row.updated_at, None);

        let work = crate::Work::try_from(row).unwrap();
        assert_eq!(work.name.as_deref(), Some("Circle"));
        let value = serde_json::to_value(&work).unwrap();
        assert_eq!(value["name"], serde_json::json!("Circle"));
        assert_eq!(value["circle"], serde_json::json!({"id": 1, "name": "Circle"}));
    }

    #[tokio::test]
    async fn test_decode_sqlite_review_row() {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
        let query = format!(
            "SELECT w.*, 4 AS userRating, 'good' AS review_text, 'listened' AS progress, \
             '2021-05-02 08-15-22' AS updated_at, 'admin' AS user_name FROM ({SELECT_WORK}) AS w"
        );
        let row: WorkRow = sqlx::query_as(&query).fetch_one(&mut conn).await.unwrap();
        assert_eq!(row.user_rating, Some(4));
        assert_eq!(row.progress.as_deref(), Some("listened"));
        assert_eq!(row.updated_at.as_deref(), Some("2021-05-02 08-15-22"));
    }

    #[test]
    fn test_decode_json_row() {
        let row: WorkRow = serde_json::from_str(
            r#"{
                "id": 1,
                "title": "Title",
                "nsfw": 0,
                "circleObj": "{\"id\":1,\"name\":\"X\"}",
                "rate_count_detail": "[]",
                "rank": null,
                "vaObj": "{\"vas\":[]}",
                "tagObj": "{\"tags\":[]}",
                "userRating": 5,
                "name": "X",
                "lyric_status": "local"
            }"#,
        )
        .unwrap();
        assert_eq!(row.circle_obj, r#"{"id":1,"name":"X"}"#);
        assert_eq!(row.user_rating, Some(5));
        assert_eq!(row.rank, None);
        assert_eq!(row.review_count, 0);
        assert_eq!(row.name.as_deref(), Some("X"));
        assert_eq!(row.extra.get("lyric_status"), Some(&Value::from("local")));
        assert!(!row.extra.contains_key("circleObj"));
    }
}
