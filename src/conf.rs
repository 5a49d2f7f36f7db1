use config::{Config, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub service_name: String,
    pub listen_port: String,
    pub database_url: String,
    pub database_pool_max_connections: u32,
    pub secret_key: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .set_default("service_name", "jobly")?
            .set_default("listen_port", "3001")?
            .set_default("database_url", "postgres://localhost/jobly")?
            .set_default("database_pool_max_connections", 5)?
            .set_default("secret_key", "secret-dev")?
            .add_source(Environment::default())
            .build()?;
        let s: Settings = conf.try_deserialize()?;
        if s.secret_key == "secret-dev" {
            tracing::warn!("SECRET_KEY not set, using the development key");
        }
        Ok(s)
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}
