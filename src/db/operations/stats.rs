use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WordPracticeTotals {
    pub word: String,
    pub correct: i64,
    pub incorrect: i64,
}

/// Correct/incorrect totals per word, most practiced first.
pub async fn practice_totals(
    conn: &mut SqliteConnection,
) -> Result<Vec<WordPracticeTotals>, sqlx::Error> {
    sqlx::query_as::<_, WordPracticeTotals>(
        r#"
        SELECT
            w."word" AS "word",
            SUM(pl."correct") AS "correct",
            SUM(pl."incorrect") AS "incorrect"
        FROM "practice_logs" pl
        JOIN "words" w ON w."id" = pl."word_id"
        GROUP BY w."word"
        ORDER BY SUM(pl."correct") + SUM(pl."incorrect") DESC, w."word" ASC
        "#,
    )
    .fetch_all(&mut *conn)
    .await
}

pub async fn distinct_word_count(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT COUNT(DISTINCT "word") FROM "words""#)
        .fetch_one(&mut *conn)
        .await
}

pub async fn most_recent_word(conn: &mut SqliteConnection) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar(
        r#"SELECT "word" FROM "words" ORDER BY "date_added" DESC, "id" DESC LIMIT 1"#,
    )
    .fetch_optional(&mut *conn)
    .await
}

/// Distinct UTC calendar days with at least one addition at or after `since`.
pub async fn addition_days_since(
    conn: &mut SqliteConnection,
    since: DateTime<Utc>,
) -> Result<Vec<NaiveDate>, sqlx::Error> {
    let raw: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT DISTINCT substr("date_added", 1, 10)
        FROM "words"
        WHERE "date_added" >= ?
        "#,
    )
    .bind(since)
    .fetch_all(&mut *conn)
    .await?;

    Ok(raw
        .iter()
        .filter_map(|day| match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(err) => {
                tracing::warn!(day = %day, error = %err, "skipping unparseable date_added");
                None
            }
        })
        .collect())
}
