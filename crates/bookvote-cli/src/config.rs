use bookvote_types::config::default_client_dir;
use clap::{Parser, Subcommand};
use url::Url;

use crate::commands::{
    list::ListCmd, publish::PublishCmd, stats::StatsCmd, viewer::ViewerCmd, vote::VoteCmd,
};

#[derive(Parser)]
#[command(
    version,
    about,
    long_about = "Terminal client for bookvote - list, publish and rate books, browse them in viewer mode."
)]
pub struct CliConfig {
    #[arg(
        long,
        env = "BOOKVOTE_SERVER_URL",
        default_value = "http://localhost:3000",
        help = "Base URL of bookvote server"
    )]
    pub server_url: Url,

    #[arg(
        long,
        env = "BOOKVOTE_CLIENT_DIR",
        default_value_t = default_client_dir(),
        help = "Directory where client id is kept, default is system default like ~/.config/bookvote-client"
    )]
    pub client_dir: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// All books, newest first
    List(ListCmd),
    /// Leaderboard of books
    Stats(StatsCmd),
    /// Publish new book
    Publish(PublishCmd),
    /// Rate a book and show updated list
    Vote(VoteCmd),
    /// Interactive viewer, one book at a time
    Viewer(ViewerCmd),
}

impl crate::commands::Executor for Command {
    async fn run(self, client: &crate::client::ApiClient) -> anyhow::Result<()> {
        match self {
            Command::List(cmd) => cmd.run(client).await,
            Command::Stats(cmd) => cmd.run(client).await,
            Command::Publish(cmd) => cmd.run(client).await,
            Command::Vote(cmd) => cmd.run(client).await,
            Command::Viewer(cmd) => cmd.run(client).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vote() {
        let config = CliConfig::try_parse_from([
            "bookvote-cli",
            "--client-dir",
            "/tmp/bv-client",
            "--server-url",
            "http://books.local:8080",
            "vote",
            "3",
            "5",
        ])
        .unwrap();
        assert_eq!(config.server_url.as_str(), "http://books.local:8080/");
        assert_eq!(config.client_dir, "/tmp/bv-client");
        assert!(matches!(config.command, Command::Vote(_)));
    }

    #[test]
    fn test_vote_score_validated() {
        let res = CliConfig::try_parse_from([
            "bookvote-cli",
            "--client-dir",
            "/tmp/bv-client",
            "vote",
            "3",
            "9",
        ]);
        assert!(res.is_err());
    }
}
