use std::path::PathBuf;

use crate::auth::jwt::TokenConfig;

/// Default per-guest view dedup window in seconds. `0` disables dedup.
const DEFAULT_VIEW_DEDUP_WINDOW_SECS: i64 = 60;

/// Runtime settings for the HTTP server, resolved once at startup.
///
/// Every value can be overridden through an environment variable; the
/// built-in defaults are aimed at local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind (`HOST`, default `0.0.0.0`).
    pub host: String,
    /// TCP port to bind (`PORT`, default `3000`).
    pub port: u16,
    /// Origins the browser frontend may call us from, taken from the
    /// comma-separated `CORS_ORIGINS` variable.
    pub cors_origins: Vec<String>,
    /// Per-request deadline, seconds. Requests past it get a 408.
    pub request_timeout_secs: u64,
    /// How long shutdown waits for in-flight requests, seconds.
    pub shutdown_timeout_secs: u64,
    /// Window (seconds) during which repeat views from the same guest are
    /// not counted again. `0` disables dedup entirely.
    pub view_dedup_window_secs: i64,
    /// Access/refresh token settings, see [`TokenConfig`].
    pub jwt: TokenConfig,
    /// Object storage backend for admin uploads.
    pub storage: StorageConfig,
}

/// Which object storage backend serves admin uploads.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// Files on the local filesystem, served back via `/uploads`.
    Local {
        /// Directory uploaded files are written to.
        upload_root: PathBuf,
        /// Base URL prepended to `/uploads/<name>` in returned URLs.
        /// Empty means relative URLs (same origin).
        public_base: String,
    },
    /// Files in an S3 bucket.
    S3 {
        bucket: String,
        /// Key prefix inside the bucket (default `uploads/`).
        key_prefix: String,
        /// Base URL for returned object URLs. Defaults to the bucket's
        /// virtual-hosted AWS URL when unset.
        public_base: Option<String>,
    },
}

impl ServerConfig {
    /// Resolve the full configuration from the process environment.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`  | `30`                       |
    /// | `VIEW_DEDUP_WINDOW_SECS` | `60` (0 disables)          |
    /// | `STORAGE_BACKEND`        | `local` (or `s3`)          |
    /// | `UPLOAD_ROOT`            | `./uploads`                |
    /// | `UPLOAD_PUBLIC_BASE`     | `` (relative URLs)         |
    /// | `S3_BUCKET`              | required when `s3`         |
    /// | `S3_KEY_PREFIX`          | `uploads/`                 |
    /// | `S3_PUBLIC_BASE`         | bucket AWS URL             |
    ///
    /// JWT settings are loaded by [`TokenConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on malformed numeric values, an unknown `STORAGE_BACKEND`,
    /// or a missing `S3_BUCKET` when the s3 backend is selected.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let view_dedup_window_secs: i64 = std::env::var("VIEW_DEDUP_WINDOW_SECS")
            .unwrap_or_else(|_| DEFAULT_VIEW_DEDUP_WINDOW_SECS.to_string())
            .parse()
            .expect("VIEW_DEDUP_WINDOW_SECS must be a valid i64");
        assert!(
            view_dedup_window_secs >= 0,
            "VIEW_DEDUP_WINDOW_SECS must not be negative"
        );

        let jwt = TokenConfig::from_env();
        let storage = StorageConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            view_dedup_window_secs,
            jwt,
            storage,
        }
    }
}

impl StorageConfig {
    /// Load the storage backend selection from environment variables.
    ///
    /// # Panics
    ///
    /// Panics on an unknown `STORAGE_BACKEND` value, or when `s3` is
    /// selected without `S3_BUCKET`.
    pub fn from_env() -> Self {
        let backend = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "local".into());
        match backend.as_str() {
            "local" => {
                let upload_root =
                    std::env::var("UPLOAD_ROOT").unwrap_or_else(|_| "./uploads".into());
                let public_base = std::env::var("UPLOAD_PUBLIC_BASE").unwrap_or_default();
                StorageConfig::Local {
                    upload_root: PathBuf::from(upload_root),
                    public_base,
                }
            }
            "s3" => {
                let bucket = std::env::var("S3_BUCKET")
                    .expect("S3_BUCKET must be set when STORAGE_BACKEND=s3");
                let key_prefix =
                    std::env::var("S3_KEY_PREFIX").unwrap_or_else(|_| "uploads/".into());
                let public_base = std::env::var("S3_PUBLIC_BASE").ok();
                StorageConfig::S3 {
                    bucket,
                    key_prefix,
                    public_base,
                }
            }
            other => panic!("Unknown STORAGE_BACKEND '{other}'. Must be 'local' or 's3'"),
        }
    }
}
