use bookvote_types::Score;
use clap::Parser;

use crate::{
    client::{ApiClient, VoteOutcome},
    commands::Executor,
    render::render_list,
};

#[derive(Parser, Debug)]
pub struct VoteCmd {
    #[arg(help = "Id of the book")]
    book_id: i64,

    #[arg(help = "Score 1-5")]
    score: Score,
}

pub fn describe_vote(book_id: i64, score: Score, outcome: VoteOutcome) -> String {
    match outcome {
        VoteOutcome::Recorded => format!("Rated book #{book_id} with {score} stars"),
        VoteOutcome::AlreadyVoted => format!("You have already rated book #{book_id}"),
    }
}

impl Executor for VoteCmd {
    async fn run(self, client: &ApiClient) -> anyhow::Result<()> {
        let outcome = client.vote(self.book_id, self.score).await?;
        println!("{}", describe_vote(self.book_id, self.score, outcome));
        let books = client.fetch_books().await?;
        println!("{}", render_list(&books));
        Ok(())
    }
}
