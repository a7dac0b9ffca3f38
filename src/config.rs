//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Server bind address (host:port)
    pub bind_address: String,

    /// Directory where uploaded attachments are stored
    pub upload_dir: String,

    /// Session lifetime in hours
    pub session_ttl_hours: i64,

    /// Username of the admin account provisioned at boot
    pub admin_username: String,

    /// Admin password; when unset a random one is generated and logged
    pub admin_password: Option<String>,

    /// Default subnet prefix for the IP availability scan
    pub subnet_prefix: String,

    /// Default first host number of the scan range
    pub ip_range_start: i64,

    /// Default last host number of the scan range
    pub ip_range_end: i64,

    /// Maximum number of free addresses returned per scan
    pub ip_scan_limit: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://inventory.db".into()),
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()),
            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .unwrap_or_else(|_| "24".into())
                .parse()
                .unwrap_or(24),
            admin_username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty()),
            subnet_prefix: env::var("SUBNET_PREFIX").unwrap_or_else(|_| "192.168.3".into()),
            ip_range_start: env::var("IP_RANGE_START")
                .unwrap_or_else(|_| "1".into())
                .parse()
                .unwrap_or(1),
            ip_range_end: env::var("IP_RANGE_END")
                .unwrap_or_else(|_| "254".into())
                .parse()
                .unwrap_or(254),
            ip_scan_limit: env::var("IP_SCAN_LIMIT")
                .unwrap_or_else(|_| "1500".into())
                .parse()
                .unwrap_or(1500),
        }
    }
}
