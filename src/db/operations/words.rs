use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

/// Upper bound on entries returned by a practice batch.
pub const PRACTICE_BATCH_SIZE: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WordEntry {
    pub id: i64,
    pub word: String,
    pub definition: String,
    pub example: Option<String>,
    pub date_added: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub definition: String,
    pub example: Option<String>,
}

/// Inserts `(word, definition)` unless that pair is already stored.
/// Returns whether a row was written.
pub async fn insert_definition(
    conn: &mut SqliteConnection,
    word: &str,
    definition: &Definition,
    date_added: DateTime<Utc>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT OR IGNORE INTO "words" ("word", "definition", "example", "date_added")
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(word)
    .bind(&definition.definition)
    .bind(&definition.example)
    .bind(date_added)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn saved_definitions(
    conn: &mut SqliteConnection,
    word: &str,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT "definition" FROM "words" WHERE "word" = ? ORDER BY "id" ASC"#)
        .bind(word)
        .fetch_all(&mut *conn)
        .await
}

pub async fn count_entries(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT COUNT(*) FROM "words""#)
        .fetch_one(&mut *conn)
        .await
}

/// Picks one stored entry uniformly at random.
pub async fn random_entry(conn: &mut SqliteConnection) -> Result<Option<WordEntry>, sqlx::Error> {
    let total = count_entries(conn).await?;
    if total == 0 {
        return Ok(None);
    }
    let offset = rand::rng().random_range(0..total);

    sqlx::query_as::<_, WordEntry>(
        r#"
        SELECT "id", "word", "definition", "example", "date_added"
        FROM "words"
        ORDER BY "id" ASC
        LIMIT 1 OFFSET ?
        "#,
    )
    .bind(offset)
    .fetch_optional(&mut *conn)
    .await
}

/// Picks up to `limit` distinct words, one random definition each, in random order.
pub async fn random_practice_batch(
    conn: &mut SqliteConnection,
    limit: usize,
) -> Result<Vec<WordEntry>, sqlx::Error> {
    let words: Vec<String> = sqlx::query_scalar(r#"SELECT DISTINCT "word" FROM "words""#)
        .fetch_all(&mut *conn)
        .await?;
    if words.is_empty() || limit == 0 {
        return Ok(Vec::new());
    }

    let picked = choose_words(&words, limit);

    let mut qb = QueryBuilder::<Sqlite>::new(
        r#"
        SELECT "id", "word", "definition", "example", "date_added"
        FROM "words"
        WHERE "word" IN (
        "#,
    );
    {
        let mut separated = qb.separated(", ");
        for word in &picked {
            separated.push_bind(word.clone());
        }
        separated.push_unseparated(")");
    }

    let entries = qb
        .build_query_as::<WordEntry>()
        .fetch_all(&mut *conn)
        .await?;

    Ok(one_per_word(entries))
}

fn choose_words(words: &[String], limit: usize) -> Vec<String> {
    let mut rng = rand::rng();
    words
        .choose_multiple(&mut rng, limit)
        .cloned()
        .collect()
}

fn one_per_word(entries: Vec<WordEntry>) -> Vec<WordEntry> {
    let mut grouped: HashMap<String, Vec<WordEntry>> = HashMap::new();
    for entry in entries {
        grouped.entry(entry.word.clone()).or_default().push(entry);
    }

    let mut rng = rand::rng();
    let mut batch: Vec<WordEntry> = grouped
        .into_values()
        .filter_map(|candidates| candidates.choose(&mut rng).cloned())
        .collect();
    batch.shuffle(&mut rng);
    batch
}
