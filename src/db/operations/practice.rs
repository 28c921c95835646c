use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PracticeLog {
    pub word_id: i64,
    pub last_seen: DateTime<Utc>,
    pub correct: i64,
    pub incorrect: i64,
}

/// Records one practice attempt as a single upsert statement.
///
/// The first attempt for a word creates its row with the matching counter at 1;
/// later attempts increment in place. Returns `false` when `word_id` does not
/// reference a stored word, in which case nothing is written.
pub async fn record_attempt(
    conn: &mut SqliteConnection,
    word_id: i64,
    correct: bool,
    seen_at: DateTime<Utc>,
) -> Result<bool, sqlx::Error> {
    let (correct_inc, incorrect_inc) = if correct { (1_i64, 0_i64) } else { (0, 1) };

    let result = sqlx::query(
        r#"
        INSERT INTO "practice_logs" ("word_id", "last_seen", "correct", "incorrect")
        SELECT ?, ?, ?, ?
        WHERE EXISTS (SELECT 1 FROM "words" WHERE "id" = ?)
        ON CONFLICT ("word_id") DO UPDATE SET
            "last_seen" = excluded."last_seen",
            "correct" = "practice_logs"."correct" + excluded."correct",
            "incorrect" = "practice_logs"."incorrect" + excluded."incorrect"
        "#,
    )
    .bind(word_id)
    .bind(seen_at)
    .bind(correct_inc)
    .bind(incorrect_inc)
    .bind(word_id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_log(
    conn: &mut SqliteConnection,
    word_id: i64,
) -> Result<Option<PracticeLog>, sqlx::Error> {
    sqlx::query_as::<_, PracticeLog>(
        r#"
        SELECT "word_id", "last_seen", "correct", "incorrect"
        FROM "practice_logs"
        WHERE "word_id" = ?
        "#,
    )
    .bind(word_id)
    .fetch_optional(&mut *conn)
    .await
}
