use std::path::Path;

use crate::{
    client::ApiClient, client_id::load_or_create_client_id, commands::Executor as _,
    config::CliConfig,
};
use anyhow::Result;
use tracing::debug;

pub async fn run(config: CliConfig) -> Result<()> {
    let client_id = load_or_create_client_id(Path::new(&config.client_dir)).await?;
    debug!("Using client id {client_id}");
    let client = ApiClient::new(config.server_url, client_id)?;
    config.command.run(&client).await
}
