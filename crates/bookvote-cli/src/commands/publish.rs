use std::path::PathBuf;

use clap::Parser;

use crate::{
    client::{ApiClient, PublishOutcome},
    commands::Executor,
};

#[derive(Parser, Debug)]
pub struct PublishCmd {
    #[arg(short, long, help = "Title of the book, required, must not be blank")]
    title: String,

    #[arg(
        short,
        long,
        help = "Cover image, content type is guessed from file extension"
    )]
    image: Option<PathBuf>,
}

pub fn describe_publish(outcome: &PublishOutcome) -> String {
    if outcome.created {
        format!("Published #{} {}", outcome.book.id, outcome.book.title)
    } else {
        format!(
            "Book #{} {} was already published",
            outcome.book.id, outcome.book.title
        )
    }
}

impl Executor for PublishCmd {
    async fn run(self, client: &ApiClient) -> anyhow::Result<()> {
        if self.title.trim().is_empty() {
            anyhow::bail!("Title is required");
        }
        let outcome = client.publish(&self.title, self.image.as_deref()).await?;
        println!("{}", describe_publish(&outcome));
        Ok(())
    }
}
