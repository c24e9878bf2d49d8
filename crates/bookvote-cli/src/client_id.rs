use std::path::Path;

use anyhow::{Context, Result};
use bookvote_types::ClientId;
use tracing::info;
use uuid::Uuid;

pub const CLIENT_ID_FILE: &str = "client_id";

/// Returns id stored in `dir`, or generates new one and stores it there
pub async fn load_or_create_client_id(dir: &Path) -> Result<ClientId> {
    let file = dir.join(CLIENT_ID_FILE);
    match tokio::fs::read_to_string(&file).await {
        Ok(content) => {
            if let Some(id) = ClientId::new(content.trim()) {
                return Ok(id);
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(e).with_context(|| format!("Cannot read client id from {file:?}"));
        }
    }

    let id = Uuid::new_v4().to_string();
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Cannot create client directory {dir:?}"))?;
    tokio::fs::write(&file, &id)
        .await
        .with_context(|| format!("Cannot store client id to {file:?}"))?;
    info!("Generated new client id {id}");
    ClientId::new(id).context("Generated client id is empty")
}
