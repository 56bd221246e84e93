mod config;
mod lookup;
mod session;
mod types;
mod words;

use anyhow::Result;
use clap::Parser;
use config::Config;
use log::info;
use lookup::DatamuseClient;
use session::BoardSession;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use types::{Cell, SelectOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let mut logger_builder = env_logger::Builder::from_default_env();
    logger_builder.filter_level(config.log_level.parse().unwrap_or(log::LevelFilter::Info));
    logger_builder.init();

    info!("Starting word-groups");
    info!("Configuration: {:?}", config);

    let topics = match &config.word_list {
        Some(path) => words::load_topics(path)?,
        None => words::builtin_topics(),
    };
    info!("Loaded {} candidate topics", topics.len());

    let lookup = DatamuseClient::new(&config.api_url, Duration::from_secs(config.timeout_secs))?;
    let session = BoardSession::new(config.board_size, topics, lookup, config.seed);

    println!(
        "Click tiles you think are associated by typing the word. Groups range \
         from size 1 to {}. Commands: `new` restarts, `quit` exits.",
        config.board_size
    );

    if session.start_new_round().await.is_err() {
        print_error(&session).await;
    }
    print_board(&session).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        match input {
            "" => continue,
            "quit" => break,
            "new" => {
                if session.clear().await.is_err() {
                    print_error(&session).await;
                }
            }
            word => match session.select(word).await {
                Ok(SelectOutcome::Ignored) => println!("({} is not selectable)", word),
                Ok(SelectOutcome::Partial) => println!("{} might belong...", word),
                Ok(SelectOutcome::GroupLocked) => println!("Group found!"),
                Ok(SelectOutcome::RoundComplete) => println!("Round complete! New board coming up."),
                Ok(SelectOutcome::Mismatch) => println!("Not a group. Selection reset."),
                Err(_) => print_error(&session).await,
            },
        }
        print_board(&session).await;
    }

    info!("Goodbye");
    Ok(())
}

async fn print_error(session: &BoardSession<DatamuseClient>) {
    if let Some(message) = session.error_message().await {
        println!("{}", message);
    }
}

/// Render the board grid; locked tiles are bracketed, selected tiles starred
async fn print_board(session: &BoardSession<DatamuseClient>) {
    let board = session.board().await;
    let size = session.board_size();
    let width = board.iter().map(|c| c.word().len()).max().unwrap_or(2) + 2;

    println!();
    for row in board.chunks(size) {
        let line: Vec<String> = row
            .iter()
            .map(|cell| {
                let rendered = match cell {
                    Cell::Tile(tile) if tile.locked => format!("[{}]", tile.word),
                    Cell::Tile(tile) if tile.color.is_some() => format!("*{}*", tile.word),
                    cell => cell.word().to_string(),
                };
                format!("{:width$}", rendered, width = width)
            })
            .collect();
        println!("  {}", line.join(" "));
    }
    println!(
        "\nGames solved: {}   Groups found this game: {}/{}",
        session.rounds_completed().await,
        session.groups_solved().await,
        session.group_count().await,
    );
}
