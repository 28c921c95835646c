use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::db::{Database, DbInitError};
use crate::services::dictionary::DictionaryClient;

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    db: Database,
    dictionary: Arc<DictionaryClient>,
}

impl AppState {
    pub fn new(db: Database, dictionary: DictionaryClient) -> Self {
        Self {
            started_at: Instant::now(),
            db,
            dictionary: Arc::new(dictionary),
        }
    }

    pub async fn from_config(config: &Config) -> Result<Self, DbInitError> {
        let db = Database::connect(&config.database).await?;
        Ok(Self::new(db, DictionaryClient::new(&config.dictionary)))
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn dictionary(&self) -> Arc<DictionaryClient> {
        Arc::clone(&self.dictionary)
    }
}
