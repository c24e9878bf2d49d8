use clap::Parser;

use crate::{client::ApiClient, commands::Executor, render::render_stats};

#[derive(Parser, Debug)]
pub struct StatsCmd {}

impl Executor for StatsCmd {
    async fn run(self, client: &ApiClient) -> anyhow::Result<()> {
        let stats = client.fetch_stats().await?;
        println!("{}", render_stats(&stats));
        Ok(())
    }
}
