use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en/";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log: LogConfig,
    pub database: DatabaseConfig,
    pub dictionary: DictionaryConfig,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    pub file_enabled: bool,
    pub dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub max_connections: u32,
    pub busy_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct DictionaryConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(5000);

        let host = std::env::var("HOST")
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));

        Self {
            host,
            port,
            log: LogConfig::from_env(),
            database: DatabaseConfig::from_env(),
            dictionary: DictionaryConfig::from_env(),
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl LogConfig {
    fn from_env() -> Self {
        Self {
            level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            file_enabled: env_bool("ENABLE_FILE_LOGS", false),
            dir: PathBuf::from(std::env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string())),
        }
    }
}

impl DatabaseConfig {
    fn from_env() -> Self {
        let path = std::env::var("DATABASE_PATH")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        Self {
            path,
            max_connections: env_u32("SQLITE_MAX_CONNECTIONS", 5).max(1),
            busy_timeout: Duration::from_millis(env_u64("SQLITE_BUSY_TIMEOUT_MS", 30_000)),
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_connections: 5,
            busy_timeout: Duration::from_secs(30),
        }
    }
}

impl DictionaryConfig {
    fn from_env() -> Self {
        let base_url = std::env::var("DICTIONARY_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DICTIONARY_URL.to_string());

        Self {
            base_url: normalize_base_url(&base_url),
            timeout: Duration::from_millis(env_u64("DICTIONARY_TIMEOUT_MS", 10_000)),
        }
    }

    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            timeout,
        }
    }
}

fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("vocab-backend").join("vocab.db"))
        .unwrap_or_else(|| PathBuf::from("./vocab.db"))
}

/// The word is appended directly to the base URL, so it must end in `/`.
fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .as_deref()
        .and_then(parse_bool)
        .unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .unwrap_or(default)
}
