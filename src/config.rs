use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
const DEFAULT_API_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_EXERCISE_DELAY_MS: u64 = 1_500;
const STORAGE_FILE: &str = "storage.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    /// Set when `ENABLE_FILE_LOGS` is on; rolling log files go here.
    pub log_dir: Option<PathBuf>,
    pub api_base_url: String,
    pub api_timeout: Duration,
    pub data_dir: PathBuf,
    pub exercise_delay: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3000);

        let host = std::env::var("HOST")
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_dir = env_bool("ENABLE_FILE_LOGS")
            .unwrap_or(false)
            .then(|| PathBuf::from(env_string("LOG_DIR").unwrap_or_else(|| "./logs".to_string())));

        let api_base_url = normalize_base_url(
            &env_string("VTB_API_BASE_URL")
                .or_else(|| env_string("VITE_API_BASE_URL"))
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        );

        let api_timeout = Duration::from_millis(
            env_u64("VTB_API_TIMEOUT_MS").unwrap_or(DEFAULT_API_TIMEOUT_MS),
        );

        let data_dir = env_string("VTB_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data"));

        let exercise_delay = Duration::from_millis(
            env_u64("VTB_EXERCISE_DELAY_MS").unwrap_or(DEFAULT_EXERCISE_DELAY_MS),
        );

        Self {
            host,
            port,
            log_level,
            log_dir,
            api_base_url,
            api_timeout,
            data_dir,
            exercise_delay,
        }
    }

    /// Configuration for tests and embedding: local API, no exercise delay.
    pub fn local(data_dir: impl Into<PathBuf>, api_base_url: &str) -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            log_level: "info".to_string(),
            log_dir: None,
            api_base_url: normalize_base_url(api_base_url),
            api_timeout: Duration::from_millis(DEFAULT_API_TIMEOUT_MS),
            data_dir: data_dir.into(),
            exercise_delay: Duration::ZERO,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE)
    }
}

fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DEFAULT_API_BASE_URL.to_string();
    }
    trimmed.trim_end_matches('/').to_string()
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_bool(key: &str) -> Option<bool> {
    let value = env_string(key)?;
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_u64(key: &str) -> Option<u64> {
    env_string(key).and_then(|v| v.parse::<u64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slash() {
        assert_eq!(
            normalize_base_url("http://api.example.com/v1/"),
            "http://api.example.com/v1"
        );
        assert_eq!(normalize_base_url("   "), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn storage_path_lives_in_data_dir() {
        let config = Config::local("/tmp/vtb", "http://127.0.0.1:9/api/v1/");
        assert_eq!(config.storage_path(), PathBuf::from("/tmp/vtb/storage.json"));
        assert_eq!(config.api_base_url, "http://127.0.0.1:9/api/v1");
        assert!(config.exercise_delay.is_zero());
    }
}
