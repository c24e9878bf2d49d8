use clap::Parser;

use crate::{client::ApiClient, commands::Executor, render::render_list};

#[derive(Parser, Debug)]
pub struct ListCmd {}

impl Executor for ListCmd {
    async fn run(self, client: &ApiClient) -> anyhow::Result<()> {
        let books = client.fetch_books().await?;
        println!("{}", render_list(&books));
        Ok(())
    }
}
