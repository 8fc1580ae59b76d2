//! `sorter` - terminal front-end for the item sorter.
//!
//! Lists items, moves them into their categories on request and reports
//! them as they return on their own.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod command;
mod settings;
mod view;

use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use sorter_catalog::{LoadState, UsersClient, load_produce, load_users};
use sorter_core::{MoveOutcome, ReturnOutcome, Sorter};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use command::{Command, HELP};

/// Where the items come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Source {
    /// The bundled fruit and vegetable list.
    Produce,
    /// The remote user directory, sorted by department.
    Users,
}

#[derive(Parser)]
#[command(name = "sorter", version, about = "Sort items into categories; they come back on their own")]
struct Cli {
    /// Record source.
    #[arg(long, value_enum, default_value_t = Source::Produce)]
    source: Source,
    /// Base URL of the user directory.
    #[arg(long)]
    users_url: Option<String>,
    /// Milliseconds before a moved item returns (overrides settings).
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Print snapshots as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sorter=info,sorter_core=info,sorter_catalog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting sorter");

    let cli = Cli::parse();

    let mut config = settings::load_settings_or_default(&settings::settings_path()).await;
    if let Some(ms) = cli.delay_ms {
        config = config.with_return_delay(Duration::from_millis(ms));
    }

    let state = match cli.source {
        Source::Produce => load_produce(config),
        Source::Users => {
            println!("Loading users...");
            let client = match &cli.users_url {
                Some(url) => UsersClient::new(url),
                None => UsersClient::dummyjson(),
            }
            .context("Invalid user directory URL")?;
            load_users(&client, config).await
        }
    };

    let mut sorter = match state {
        LoadState::Ready(sorter) => sorter,
        LoadState::Failed { message } => bail!("Failed to load items: {message}"),
        LoadState::Loading => bail!("Loading did not finish"),
    };

    let result = run(&mut sorter, cli.json).await;
    sorter.shutdown();
    result
}

/// Reads commands until stdin closes or the user quits, applying
/// scheduled returns as they fall due.
async fn run(sorter: &mut Sorter, json: bool) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_state(sorter, json)?;
    println!("{HELP}");

    loop {
        let armed = sorter.next_deadline().is_some();
        tokio::select! {
            returned = sorter.next_auto_returns(), if armed => {
                for id in returned {
                    println!("Item #{id} returned");
                }
                print_state(sorter, json)?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match Command::parse(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(command)) => apply(sorter, command, json)?,
                    Ok(None) => {}
                    Err(message) => println!("{message}"),
                }
            }
        }
    }
    Ok(())
}

fn apply(sorter: &mut Sorter, command: Command, json: bool) -> anyhow::Result<()> {
    match command {
        Command::List => {}
        Command::Move(position) => {
            let Some(id) = sorter.home().get(position).map(|item| item.id) else {
                println!("No item at position {position}");
                return Ok(());
            };
            match sorter.move_to_category(id, position) {
                MoveOutcome::Moved { category, .. } => println!(
                    "Item #{id} moved to {category}, back in {}s",
                    sorter.config().return_delay.as_secs_f32()
                ),
                MoveOutcome::Stale => println!("Item #{id} is no longer there"),
            }
        }
        Command::Return(id) => match sorter.return_now(id) {
            ReturnOutcome::Returned { category } => println!("Item #{id} returned from {category}"),
            ReturnOutcome::AlreadyHome => println!("Item #{id} is not in a category"),
        },
        Command::Reset => {
            sorter.reset();
            println!("All items reset");
        }
        Command::Help => {
            println!("{HELP}");
            return Ok(());
        }
        Command::Quit => return Ok(()),
    }
    print_state(sorter, json)
}

fn print_state(sorter: &Sorter, json: bool) -> anyhow::Result<()> {
    let snapshot = sorter.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", view::render(&snapshot));
    }
    Ok(())
}
