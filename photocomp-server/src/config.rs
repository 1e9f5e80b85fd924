use std::net::SocketAddr;

use photocomp_api_rest::RestConfig;
use photocomp_common::error::Error;
use serde::Deserialize;

use crate::parser::parse_yaml_file;

const ENV_PREFIX: &str = "PHOTOCOMP_";
const MAX_IMAGE_WIDTH: u64 = 1000;

/// Server settings.
/// ---
/// Layered lowest to highest: defaults, YAML file, environment, CLI flags.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// No url means the in-memory store.
    pub database_url: Option<String>,
    pub run_migrations: bool,
    #[serde(flatten)]
    pub rest: RestConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            database_url: None,
            run_migrations: true,
            rest: RestConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Builds the config from an optional YAML file and the environment.
    pub fn load(path: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut config = match path {
            Some(path) => parse_yaml_file(path)?,
            None => Self::default(),
        };
        config.apply_env(env)?;
        Ok(config)
    }

    /// Overrides fields from `PHOTOCOMP_*` variables and `DATABASE_URL`.
    pub fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<(), Error> {
        let var = |name: &str| env(&format!("{ENV_PREFIX}{name}"));

        if let Some(v) = var("LISTEN_ADDR") {
            self.listen_addr = v;
        }
        if let Some(v) = env("DATABASE_URL").or_else(|| var("DATABASE_URL")) {
            self.database_url = Some(v).filter(|v| !v.is_empty());
        }
        if let Some(v) = var("RUN_MIGRATIONS") {
            self.run_migrations = parse_env("RUN_MIGRATIONS", &v)?;
        }
        if let Some(v) = var("API_VERSION") {
            self.rest.api_version = v;
        }
        if let Some(v) = var("DEFAULT_LIMIT") {
            self.rest.default_limit = parse_env("DEFAULT_LIMIT", &v)?;
        }
        if let Some(v) = var("MAX_LIMIT") {
            self.rest.max_limit = parse_env("MAX_LIMIT", &v)?;
        }
        if let Some(v) = var("INCLUDE_RESTRICTED_DATA") {
            self.rest.include_restricted_data = parse_env("INCLUDE_RESTRICTED_DATA", &v)?;
        }
        if let Some(v) = var("IMAGE_BASE_URL") {
            self.rest.image_base_url = Some(v).filter(|v| !v.is_empty());
        }
        if let Some(v) = var("DEFAULT_IMAGE_WIDTH") {
            self.rest.default_image_width = parse_env("DEFAULT_IMAGE_WIDTH", &v)?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.listen_addr
            .parse::<SocketAddr>()
            .map_err(|e| Error::Config(format!("listen_addr {}: {e}", self.listen_addr)))?;

        let rest = &self.rest;
        if rest.api_version.is_empty()
            || !rest
                .api_version
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
        {
            return Err(Error::Config(format!(
                "api_version [{}] is not a valid path segment",
                rest.api_version
            )));
        }
        if rest.max_limit == 0 {
            return Err(Error::Config("max_limit must be positive".to_string()));
        }
        if rest.default_limit > rest.max_limit {
            return Err(Error::Config(format!(
                "default_limit {} exceeds max_limit {}",
                rest.default_limit, rest.max_limit
            )));
        }
        if rest.default_image_width > MAX_IMAGE_WIDTH {
            return Err(Error::Config(format!(
                "default_image_width must not exceed {MAX_IMAGE_WIDTH}"
            )));
        }

        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, Error>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| Error::Config(format!("{ENV_PREFIX}{name}={raw}: {e}")))
}
