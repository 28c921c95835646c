#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::extract::Path;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use vocab_backend_rust::config::{DatabaseConfig, DictionaryConfig};
use vocab_backend_rust::db::operations::{words, Definition};
use vocab_backend_rust::db::Database;
use vocab_backend_rust::services::dictionary::{DictionaryClient, MAX_RESPONSE_BYTES};
use vocab_backend_rust::state::AppState;

pub struct TestContext {
    pub app: Router,
    pub db: Database,
    _dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        let upstream = spawn_fake_dictionary().await;
        Self::with_dictionary(&format!("http://{upstream}/entries/en")).await
    }

    /// Builds the app against an arbitrary dictionary base URL.
    pub async fn with_dictionary(base_url: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let db = Database::connect(&DatabaseConfig::at(dir.path().join("vocab.db")))
            .await
            .expect("failed to open test database");

        let dictionary = DictionaryClient::new(&DictionaryConfig::new(
            base_url,
            Duration::from_millis(500),
        ));
        let app = vocab_backend_rust::create_app(AppState::new(db.clone(), dictionary));

        Self {
            app,
            db,
            _dir: dir,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        send(self.app.clone(), request).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        post_json(self.app.clone(), uri, body).await
    }

    pub async fn post_raw(&self, uri: &str, body: &'static str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        send(self.app.clone(), request).await
    }

    /// Inserts a definition with an explicit timestamp, bypassing the handler.
    pub async fn seed(&self, word: &str, definition: &str, date_added: DateTime<Utc>) {
        let mut conn = self.db.pool().acquire().await.unwrap();
        let def = Definition {
            definition: definition.to_string(),
            example: None,
        };
        words::insert_definition(&mut *conn, word, &def, date_added)
            .await
            .unwrap();
    }

    pub async fn word_id(&self, word: &str) -> i64 {
        sqlx::query_scalar(r#"SELECT "id" FROM "words" WHERE "word" = ? ORDER BY "id" LIMIT 1"#)
            .bind(word)
            .fetch_one(self.db.pool())
            .await
            .unwrap()
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!(r#"SELECT COUNT(*) FROM "{table}""#))
            .fetch_one(self.db.pool())
            .await
            .unwrap()
    }
}

/// Address of a local port with nothing listening on it.
pub async fn closed_local_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

/// Local stand-in for the public dictionary API.
///
/// `run` resolves normally, `garbled` answers 200 with the wrong shape,
/// `sluggish` outlives the client timeout, `bloated` sends a body past the
/// client's size limit, everything else is a 404.
async fn spawn_fake_dictionary() -> SocketAddr {
    let app = Router::new().route("/entries/en/:word", get(fake_entry));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn fake_entry(Path(word): Path<String>) -> Response {
    match word.as_str() {
        "run" => Json(json!([
            {
                "word": "run",
                "meanings": [
                    {
                        "partOfSpeech": "verb",
                        "definitions": [
                            {"definition": "To move swiftly on foot.", "example": "Run to the shop."},
                            {"definition": "To flee."}
                        ]
                    },
                    {
                        "partOfSpeech": "noun",
                        "definitions": [{"definition": "An act of running."}]
                    }
                ]
            }
        ]))
        .into_response(),
        "garbled" => Json(json!([{"word": "garbled", "senses": []}])).into_response(),
        "bloated" => {
            let padding = "x".repeat(MAX_RESPONSE_BYTES + 1);
            Json(json!([{"word": "bloated", "padding": padding, "meanings": []}])).into_response()
        }
        "sluggish" => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!([])).into_response()
        }
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"title": "No Definitions Found"})),
        )
            .into_response(),
    }
}
