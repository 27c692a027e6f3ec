use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use server_api::{agenda_options, agenda_view, markdown::to_markdown, ApiContext};
use shared::{domain::ViewMode, error::ApiException, protocol::ViewQuery};
use storage::Agenda;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Browse the conference agenda from the terminal")]
struct Cli {
    #[arg(long, default_value = "./data/agenda.csv")]
    data: PathBuf,
    /// Skip the schedule overview table.
    #[arg(long)]
    no_table: bool,
    /// Print JSON instead of markdown.
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Talks on one weekday, optionally narrowed to a start time.
    WeekdayTime {
        #[arg(long)]
        weekday: Option<String>,
        #[arg(long)]
        start_time: Option<String>,
    },
    /// Talks in one session, chosen by its "<weekday> <session>" label.
    WeekdaySession {
        #[arg(long)]
        label: Option<String>,
    },
    /// Talks whose presenter name contains QUERY.
    Name { query: String },
    /// Talks of one type.
    Type { talk_type: Option<String> },
    /// Every weekday, start time, session label and type on offer.
    Options,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let agenda = Agenda::load(&cli.data)
        .with_context(|| format!("loading agenda for {}", cli.data.display()))?;
    let ctx = ApiContext::new(agenda);

    let Some(query) = view_query(&cli.command, !cli.no_table) else {
        print_options(&ctx, cli.json)?;
        return Ok(());
    };

    let view = agenda_view(&ctx, query).map_err(ApiException::from)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", to_markdown(&view));
    }
    Ok(())
}

/// `None` for commands that do not render a view.
fn view_query(command: &Command, show_table: bool) -> Option<ViewQuery> {
    let query = match command {
        Command::WeekdayTime {
            weekday,
            start_time,
        } => ViewQuery {
            mode: ViewMode::WeekdayTime,
            weekday: weekday.clone(),
            all_times: Some(start_time.is_none()),
            start_time: start_time.clone(),
            ..ViewQuery::default()
        },
        Command::WeekdaySession { label } => ViewQuery {
            mode: ViewMode::WeekdaySession,
            session: label.clone(),
            ..ViewQuery::default()
        },
        Command::Name { query } => ViewQuery {
            mode: ViewMode::Name,
            name: Some(query.clone()),
            ..ViewQuery::default()
        },
        Command::Type { talk_type } => ViewQuery {
            mode: ViewMode::Type,
            talk_type: talk_type.clone(),
            ..ViewQuery::default()
        },
        Command::Options => return None,
    };
    Some(ViewQuery {
        show_table: Some(show_table),
        ..query
    })
}

fn print_options(ctx: &ApiContext, json: bool) -> Result<()> {
    let options = agenda_options(ctx);
    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    println!("Modes:");
    for mode in &options.modes {
        println!("  {} ({})", mode.key(), mode.label());
    }
    println!("Weekdays:");
    for day in &options.weekdays {
        println!("  {}: {}", day.weekday, day.start_times.join(", "));
    }
    println!("Sessions:");
    for label in &options.session_labels {
        println!("  {label}");
    }
    println!("Types:");
    for talk_type in &options.talk_types {
        println!("  {talk_type}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
