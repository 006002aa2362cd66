use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub s3_region: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    /// Endpoint of the external suggestion service (multipart POST).
    pub suggestion_service_url: String,
    pub suggestion_service_timeout_secs: u64,
    /// Upper bound on the job description, counted in characters.
    pub max_job_description_chars: usize,
    pub max_upload_bytes: usize,
    /// Presentation delay handed back to the caller; the server never waits on it.
    pub display_delay_ms: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            s3_region: std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            suggestion_service_url: require_env("SUGGESTION_SERVICE_URL")?,
            suggestion_service_timeout_secs: parse_env_or("SUGGESTION_SERVICE_TIMEOUT_SECS", 120)?,
            max_job_description_chars: parse_env_or("MAX_JOB_DESCRIPTION_CHARS", 3000)?,
            max_upload_bytes: parse_env_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            display_delay_ms: parse_env_or("DISPLAY_DELAY_MS", 2000)?,
            port: parse_env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Defaults with placeholder endpoints; nothing is contacted.
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://localhost/tailor_test".to_string(),
            s3_bucket: "tailor-test".to_string(),
            s3_endpoint: "http://localhost:9000".to_string(),
            s3_region: "us-east-1".to_string(),
            aws_access_key_id: "test".to_string(),
            aws_secret_access_key: "test".to_string(),
            suggestion_service_url: "http://localhost:9999/suggest".to_string(),
            suggestion_service_timeout_secs: 5,
            max_job_description_chars: 3000,
            max_upload_bytes: 1024 * 1024,
            display_delay_ms: 2000,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
