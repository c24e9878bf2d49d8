use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use bookvote_types::Score;
use clap::Parser;
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tracing::{debug, warn};

use crate::{
    client::{ApiClient, VoteOutcome},
    commands::{publish::describe_publish, vote::describe_vote, Executor},
    render::{render_stats, render_viewer, VIEWER_HELP},
    view::ViewState,
};

#[derive(Parser, Debug)]
pub struct ViewerCmd {
    #[arg(
        long,
        env = "BOOKVOTE_POLL_INTERVAL",
        default_value = "5s",
        help = "How often to refresh books from server, human friendly format (e.g. 5s, 1m)",
        value_parser = humantime::parse_duration
    )]
    poll_interval: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewerInput {
    Next,
    Rate(Score),
    Publish {
        title: String,
        image: Option<PathBuf>,
    },
    Stats,
    Help,
    Quit,
    Empty,
}

/// Parses one line typed in viewer
pub fn parse_input(line: &str) -> Result<ViewerInput, String> {
    let line = line.trim();
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };
    let no_args = |input: ViewerInput| {
        if rest.is_empty() {
            Ok(input)
        } else {
            Err(format!("Command {cmd} takes no arguments"))
        }
    };

    match cmd.to_lowercase().as_str() {
        "" => Ok(ViewerInput::Empty),
        "n" | "next" => no_args(ViewerInput::Next),
        "s" | "stats" => no_args(ViewerInput::Stats),
        "h" | "help" | "?" => no_args(ViewerInput::Help),
        "q" | "quit" | "exit" => no_args(ViewerInput::Quit),
        "r" | "rate" => rest
            .parse::<Score>()
            .map(ViewerInput::Rate)
            .map_err(|e| e.to_string()),
        "p" | "publish" => {
            let (title, image) = match rest.split_once("--image") {
                Some((title, path)) => {
                    let path = path.trim();
                    if path.is_empty() {
                        return Err("Missing image path".to_string());
                    }
                    (title.trim(), Some(PathBuf::from(path)))
                }
                None => (rest, None),
            };
            if title.is_empty() {
                return Err("Title is required".to_string());
            }
            Ok(ViewerInput::Publish {
                title: title.to_string(),
                image,
            })
        }
        other => Err(format!("Unknown command {other}, type h for help")),
    }
}

async fn refresh(client: &ApiClient, state: &mut ViewState) -> Result<bool> {
    let books = client.fetch_books().await?;
    Ok(state.replace_books(books))
}

async fn refresh_stats(client: &ApiClient, state: &mut ViewState) -> Result<bool> {
    let stats = client.fetch_stats().await?;
    Ok(state.replace_stats(stats))
}

impl Executor for ViewerCmd {
    async fn run(self, client: &ApiClient) -> anyhow::Result<()> {
        let mut state = ViewState::new();
        refresh(client, &mut state).await?;
        refresh_stats(client, &mut state).await?;
        // stats table is reprinted on changes once user asked for it
        let mut stats_shown = false;
        println!("{}", render_viewer(&state));
        println!("Type h for help");

        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // first tick is immediate
        ticker.tick().await;
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match refresh(client, &mut state).await {
                        Ok(true) => println!("{}", render_viewer(&state)),
                        Ok(false) => debug!("No changes on server"),
                        Err(e) => warn!("Refresh failed: {e}"),
                    }
                    match refresh_stats(client, &mut state).await {
                        Ok(true) if stats_shown => println!("{}", render_stats(state.stats())),
                        Ok(_) => {}
                        Err(e) => warn!("Stats refresh failed: {e}"),
                    }
                }
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    let input = match parse_input(&line) {
                        Ok(input) => input,
                        Err(msg) => {
                            println!("{msg}");
                            continue;
                        }
                    };
                    match input {
                        ViewerInput::Quit => break,
                        ViewerInput::Stats => stats_shown = true,
                        _ => {}
                    }
                    if let Err(e) = handle_input(client, &mut state, input).await {
                        println!("Error: {e}");
                    }
                }
            }
        }
        Ok(())
    }
}

async fn handle_input(client: &ApiClient, state: &mut ViewState, input: ViewerInput) -> Result<()> {
    match input {
        ViewerInput::Next => {
            state.advance();
            println!("{}", render_viewer(state));
        }
        ViewerInput::Rate(score) => {
            let Some(book_id) = state.current().map(|b| b.id) else {
                println!("No book to rate");
                return Ok(());
            };
            let outcome = client.vote(book_id, score).await?;
            println!("{}", describe_vote(book_id, score, outcome));
            if outcome == VoteOutcome::Recorded {
                refresh(client, state).await?;
                println!("{}", render_viewer(state));
            }
        }
        ViewerInput::Publish { title, image } => {
            let outcome = client.publish(&title, image.as_deref()).await?;
            println!("{}", describe_publish(&outcome));
            refresh(client, state).await?;
            state.focus(outcome.book.id);
            println!("{}", render_viewer(state));
        }
        ViewerInput::Stats => {
            refresh_stats(client, state).await?;
            println!("{}", render_stats(state.stats()));
        }
        ViewerInput::Help => println!("{VIEWER_HELP}"),
        ViewerInput::Empty => println!("{}", render_viewer(state)),
        ViewerInput::Quit => {}
    }
    Ok(())
}
