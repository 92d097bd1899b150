use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub listen_port: String,
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_ssl: bool,
    pub database_pool_max_connections: u32,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_env(Environment::default())
    }

    /// Env values stay strings until a field asks for a number or bool.
    pub fn from_env(env: Environment) -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .set_default("listen_port", "5000")?
            .set_default("db_host", "localhost")?
            .set_default("db_port", 5432)?
            .set_default("db_user", "postgres")?
            .set_default("db_password", "")?
            .set_default("db_name", "jobboard")?
            .set_default("db_ssl", false)?
            .set_default("database_pool_max_connections", 10)?
            .add_source(env)
            .build()?;
        conf.try_deserialize()
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        let ssl_mode = if self.db_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Disable
        };
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.db_name)
            .ssl_mode(ssl_mode)
    }
}
