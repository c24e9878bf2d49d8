use std::path::Path;

use anyhow::{Result, anyhow};
use bookvote_app::state::AppState;
use bookvote_server::{
    config::{Parser, ServerConfig},
    run::{build_state, run_graceful_with_state},
};
use rand::Rng as _;
use tempfile::TempDir;
use tokio::sync::oneshot;
use tracing::{debug, error};
use url::Url;

pub mod rest;

fn random_port() -> Result<u16> {
    let mut rng = rand::rng();

    let mut retries = 3;
    while retries > 0 {
        let port: u16 = rng.random_range(3030..4030);
        let addr: std::net::SocketAddr = format!("127.0.0.1:{}", port).parse()?;
        match std::net::TcpStream::connect_timeout(&addr, std::time::Duration::from_millis(100)) {
            Err(e) if e.kind() == std::io::ErrorKind::ConnectionRefused => return Ok(port),
            Err(_) => retries -= 1,
            Ok(_) => retries -= 1,
        }
    }

    Err(anyhow!("Could not find a free port"))
}

/// Keeps temporary data dir alive and stops server when dropped
pub struct ConfigGuard {
    data_dir: TempDir,
    shutdown: Option<oneshot::Sender<()>>,
}

impl ConfigGuard {
    pub fn data_dir(&self) -> &Path {
        self.data_dir.path()
    }
}

impl Drop for ConfigGuard {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

pub fn test_config(test_name: &str, base_dir: &Path) -> Result<(ServerConfig, ConfigGuard)> {
    std::fs::create_dir_all(base_dir)?;
    let tmp_data_dir = TempDir::with_prefix_in(format!("{}_", test_name), base_dir)?;
    let data_dir = tmp_data_dir.path().to_string_lossy().to_string();
    let port = random_port()?;
    let port = port.to_string();
    let base_url = format!("http://localhost:{}", port);
    let args = &[
        "bookvote-e2e-tests",
        "--data-dir",
        &data_dir,
        "--port",
        &port,
        "--base-url",
        &base_url,
    ];
    let config = ServerConfig::try_parse_from(args)?;
    Ok((
        config,
        ConfigGuard {
            data_dir: tmp_data_dir,
            shutdown: None,
        },
    ))
}

/// Config with fresh data directory under system temp dir
pub async fn prepare_env(test_name: &str) -> Result<(ServerConfig, ConfigGuard)> {
    let base_dir = std::env::temp_dir().join("bookvote-e2e-tests");
    let (config, guard) = test_config(test_name, &base_dir)?;
    debug!("Prepared environment for {test_name} in {:?}", guard.data_dir());
    Ok((config, guard))
}

async fn wait_for_server(client: &reqwest::Client, base_url: &Url) -> Result<()> {
    let health_url = base_url.join("health")?;
    for _ in 0..50 {
        match client.get(health_url.clone()).send().await {
            Ok(response) if response.status().is_success() => return Ok(()),
            _ => tokio::time::sleep(std::time::Duration::from_millis(100)).await,
        }
    }
    Err(anyhow!("Server at {base_url} did not start"))
}

/// Starts server in background and waits until it answers health check.
/// Server stops when `guard` is dropped.
pub async fn launch_env(
    args: ServerConfig,
    guard: &mut ConfigGuard,
) -> Result<(reqwest::Client, AppState)> {
    let state = build_state(&args).await?;
    let base_url = args.base_url.clone();
    let (tx, rx) = oneshot::channel::<()>();
    guard.shutdown = Some(tx);

    let server_state = state.clone();
    tokio::spawn(async move {
        let shutdown = async {
            let _ = rx.await;
        };
        if let Err(e) = run_graceful_with_state(args, server_state, shutdown).await {
            error!("Server failed: {e}");
        }
    });

    let client = reqwest::Client::new();
    wait_for_server(&client, &base_url).await?;
    Ok((client, state))
}
