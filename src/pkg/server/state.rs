use std::sync::Arc;

use sqlx::{PgPool, Postgres, Transaction, postgres::PgPoolOptions};

use crate::{conf::settings, prelude::Result};

pub fn db_pool() -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.database_pool_max_connections)
        .connect_lazy(&settings.database_url)?;
    Ok(pool)
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub db_pool: Arc<PgPool>,
    pub secret_key: Arc<str>,
}

impl AppState {
    pub fn new() -> Result<AppState> {
        Ok(AppState::with_pool(db_pool()?, &settings.secret_key))
    }

    pub fn with_pool(pool: PgPool, secret_key: &str) -> AppState {
        AppState {
            db_pool: Arc::new(pool),
            secret_key: Arc::from(secret_key),
        }
    }
}

pub trait GetTxn {
    fn begin_txn(&self) -> impl Future<Output = Result<Transaction<'static, Postgres>>> + Send;
}

impl GetTxn for PgPool {
    async fn begin_txn(&self) -> Result<Transaction<'static, Postgres>> {
        Ok(self.begin().await?)
    }
}
