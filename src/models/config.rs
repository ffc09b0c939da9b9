//! Configuration model loaded from external sources.

use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use url::Url;

use crate::domain::table::{ConfigurationError, TableMarkup};

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    /// CSV file whose header row names the row fields.
    pub dataset_path: String,
    /// Markup of the table rendered on the host page.
    pub table: TableMarkup,
}

impl ServerConfig {
    /// Loads `config/default.yaml`, the optional `config/{APP_ENV}.yaml`
    /// profile (defaults to `local`) and `APP_*` environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Root URL of this server as seen by a local client.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        let host = match self.address.as_str() {
            "0.0.0.0" | "::" => "127.0.0.1".to_string(),
            other if other.contains(':') => format!("[{other}]"),
            other => other.to_string(),
        };
        let mut base = Url::parse("http://localhost/")?;
        base.set_host(Some(&host))?;
        base.set_port(Some(self.port))
            .map_err(|_| url::ParseError::InvalidPort)?;
        Ok(base)
    }

    /// The table's `src` resolved against [`ServerConfig::base_url`].
    /// An absolute `src` is used as is.
    pub fn endpoint_url(&self) -> Result<Url, ConfigurationError> {
        let base = self.base_url().map_err(|err| {
            ConfigurationError::InvalidEndpoint(format!("{}:{}: {err}", self.address, self.port))
        })?;
        base.join(&self.table.src)
            .map_err(|err| ConfigurationError::InvalidEndpoint(format!("{}: {err}", self.table.src)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(src: &str) -> ServerConfig {
        ServerConfig {
            address: "0.0.0.0".to_string(),
            port: 8080,
            templates_dir: "templates/**/*".to_string(),
            dataset_path: "data/clients.csv".to_string(),
            table: TableMarkup::new(src, "table/rows.html"),
        }
    }

    #[test]
    fn relative_src_resolves_against_bind_address() {
        assert_eq!(
            config("/api/v1/rows").endpoint_url().unwrap().as_str(),
            "http://127.0.0.1:8080/api/v1/rows"
        );
        assert_eq!(
            config("api/v1/rows").endpoint_url().unwrap().as_str(),
            "http://127.0.0.1:8080/api/v1/rows"
        );
    }

    #[test]
    fn absolute_src_is_kept() {
        assert_eq!(
            config("https://example.com/rows").endpoint_url().unwrap().as_str(),
            "https://example.com/rows"
        );
    }

    #[test]
    fn ipv6_bind_address_is_bracketed() {
        let mut server_config = config("/api/v1/rows");
        server_config.address = "::1".to_string();
        assert_eq!(
            server_config.endpoint_url().unwrap().as_str(),
            "http://[::1]:8080/api/v1/rows"
        );
    }
}
