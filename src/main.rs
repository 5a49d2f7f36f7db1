mod cmd;
pub mod conf;
mod error;
pub mod pkg;
mod prelude;
mod token;

use tracing_subscriber::EnvFilter;

use crate::prelude::Result;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    cmd::run().await?;
    Ok(())
}
