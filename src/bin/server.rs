use std::sync::Arc;

use anyhow::Context;
use redraft::app::{App, Deployment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    redraft::setup_local_logging();

    let app = App::from_env(Deployment::Server)
        .await
        .context("failed to build app from environment")?;

    redraft::server::serve(Arc::new(app)).await
}
