use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub admin: Option<AdminConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_minutes")]
    pub access_token_minutes: i64,
    #[serde(default = "default_refresh_token_hours")]
    pub refresh_token_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            cost: auth::PasswordHasher::DEFAULT_COST,
        }
    }
}

/// Administrator created at start-up when no user has this name.
#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    pub user_name: String,
    pub password: String,
}

/// Unprefixed variables, `__` between nesting levels: STORE__URL=postgres://...
/// overrides store.url.
fn environment() -> Environment {
    Environment::default().separator("__")
}

fn default_max_connections() -> u32 {
    5
}

fn default_access_token_minutes() -> i64 {
    15
}

fn default_refresh_token_hours() -> i64 {
    24
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (STORE__URL, JWT__SECRET, ADMIN__PASSWORD, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// `jwt.secret` has no committed default and must come from the
    /// environment or a run-mode file.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        Self::build(&run_mode, environment())
    }

    fn build(run_mode: &str, environment: Environment) -> Result<Self, ConfigError> {
        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment)
            .build()?;

        configuration.try_deserialize()
    }

    pub fn token_lifetimes(&self) -> auth::TokenLifetimes {
        auth::TokenLifetimes {
            access: chrono::Duration::minutes(self.jwt.access_token_minutes),
            refresh: chrono::Duration::hours(self.jwt.refresh_token_hours),
        }
    }
}
