use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_UPLOAD_BYTES};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Every request acts on behalf of one configured owner.
    SingleUser,
    /// An upstream proxy authenticates and forwards the owner in a header.
    Proxy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
    pub proxy: Option<ProxyAuthConfig>,
    pub single_user: Option<SingleUserAuthConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProxyAuthConfig {
    pub header: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SingleUserAuthConfig {
    pub owner: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the bind address in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Tuning for the vCard import pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    /// Largest accepted upload, in bytes.
    pub max_upload_bytes: usize,
    /// Rows per insert batch in the contact store.
    pub batch_size: usize,
    /// Charset labels tried, in order, when the upload is not valid UTF-8.
    pub fallback_encodings: Vec<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            batch_size: DEFAULT_BATCH_SIZE,
            fallback_encodings: default_fallback_encodings(),
        }
    }
}

/// Legacy charsets seen in phone and desktop exports, tried after UTF-8.
#[must_use]
pub fn default_fallback_encodings() -> Vec<String> {
    ["latin1", "cp1252", "iso-8859-1"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional
    /// `config.toml` into a `Settings`.
    /// Environment variables take precedence over `config.toml` values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("logging.level", "debug")?
            .set_default("auth.method", "single_user")?
            .set_default("auth.single_user.owner", "local")?
            .set_default("auth.proxy.header", "X-Remote-User")?
            .set_default("import.max_upload_bytes", DEFAULT_MAX_UPLOAD_BYTES as u64)?
            .set_default("import.batch_size", DEFAULT_BATCH_SIZE as u64)?
            .set_default("import.fallback_encodings", default_fallback_encodings())?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Env (REHBER_IMPORT__BATCH_SIZE=100)
            .add_source(
                config::Environment::with_prefix("REHBER")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("import.fallback_encodings"),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        tracing::debug!(settings = ?settings, "Settings deserialized");

        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn loads_defaults_without_sources() {
        let settings = Settings::load().unwrap();

        assert_eq!(settings.server.port, 8698);
        assert_eq!(settings.auth.method, AuthMethod::SingleUser);
        assert_eq!(
            settings.auth.single_user.map(|s| s.owner).as_deref(),
            Some("local")
        );
        assert_eq!(settings.import.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(settings.import.fallback_encodings, default_fallback_encodings());
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
        };
        assert_eq!(server.bind_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn import_config_default_matches_constants() {
        let import = ImportConfig::default();
        assert_eq!(import.max_upload_bytes, 5 * 1024 * 1024);
        assert_eq!(import.fallback_encodings.len(), 3);
    }
}
