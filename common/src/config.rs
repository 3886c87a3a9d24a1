//! Environment-based configuration.
//!
//! Both binaries load their settings from the process environment with
//! sensible defaults, so a bare `cargo run` works against localhost.

/// Listen configuration for a service binary.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Service name used in logs and response metadata.
    pub service: String,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl AppConfig {
    /// Loads configuration for the named service.
    ///
    /// `SERVER_HOST` / `SERVER_PORT` override the defaults.
    pub fn load_with_service(service: &str) -> Self {
        let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080);
        Self {
            service: service.to_string(),
            host,
            port,
        }
    }

    /// Address string suitable for a TCP bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where the dashboard finds the migration backend and how long it waits.
///
/// Every outbound request shares the same bounded timeout; there are no
/// per-component timers.
#[derive(Debug, Clone)]
pub struct BackendSettings {
    /// Base URL of the backend API, without a trailing slash.
    pub base_url: String,
    /// Deadline applied to every request, in seconds.
    pub timeout_secs: u64,
}

impl BackendSettings {
    /// Loads backend settings from the environment.
    ///
    /// `MIGRATION_BACKEND_URL` and `MIGRATION_BACKEND_TIMEOUT_SECS`
    /// override the defaults.
    pub fn load() -> Self {
        let base_url = std::env::var("MIGRATION_BACKEND_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
        let timeout_secs = std::env::var("MIGRATION_BACKEND_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        }
    }

    /// Builds settings for a known base URL (tests, ephemeral backends).
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let settings = BackendSettings::for_base_url("http://127.0.0.1:9000/");
        assert_eq!(settings.base_url, "http://127.0.0.1:9000");
    }
}
