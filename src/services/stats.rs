use std::collections::HashSet;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;
use sqlx::SqliteConnection;

use crate::db::operations::stats as stats_ops;
use crate::db::operations::WordPracticeTotals;

/// Days, today included, that a streak may span.
pub const STREAK_WINDOW_DAYS: u32 = 30;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub streak: u32,
    pub word_count: i64,
    pub most_recent: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub practice_stats: Vec<WordPracticeTotals>,
    pub summary: StatsSummary,
}

pub async fn build_report(
    conn: &mut SqliteConnection,
    now: DateTime<Utc>,
) -> Result<StatsReport, sqlx::Error> {
    let today = now.date_naive();

    let practice_stats = stats_ops::practice_totals(conn).await?;
    let word_count = stats_ops::distinct_word_count(conn).await?;
    let most_recent = stats_ops::most_recent_word(conn).await?;
    let days = stats_ops::addition_days_since(conn, window_start(today)).await?;

    Ok(StatsReport {
        practice_stats,
        summary: StatsSummary {
            streak: current_streak(&days, today),
            word_count,
            most_recent,
        },
    })
}

fn window_start(today: NaiveDate) -> DateTime<Utc> {
    let first_day = today
        .checked_sub_days(Days::new(u64::from(STREAK_WINDOW_DAYS - 1)))
        .unwrap_or(today);
    first_day.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc()
}

/// Length of the run of consecutive addition days ending on `today`, capped
/// at the window size. Zero when nothing was added today.
pub fn current_streak(days: &[NaiveDate], today: NaiveDate) -> u32 {
    let active: HashSet<NaiveDate> = days.iter().copied().collect();

    let mut streak = 0;
    let mut day = today;
    while streak < STREAK_WINDOW_DAYS && active.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}
