//! `standup` - CLI for the standup tracker
//!
//! This binary serves the standup HTTP API and provides client commands
//! for submitting and viewing entries.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use chrono::Local;
use clap::Parser;

use standup::cli::{Cli, Command, ConfigCommand, OutputFormat};
use standup::view;
use standup::{init_logging, ApiClient, Config, EntryForm, Session, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Serve(cmd) => handle_serve(config, &cmd).await,
        Command::Submit(cmd) => handle_submit(&config, cmd).await,
        Command::List(cmd) => handle_list(&config, &cmd).await,
        Command::Show(cmd) => handle_show(&config, &cmd).await,
        Command::Delete(cmd) => handle_delete(&config, &cmd).await,
        Command::Clear(cmd) => handle_clear(&config, &cmd).await,
        Command::Status(cmd) => handle_status(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

async fn handle_serve(
    mut config: Config,
    cmd: &standup::cli::ServeCommand,
) -> anyhow::Result<()> {
    if let Some(host) = &cmd.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = cmd.port {
        config.server.port = port;
    }

    let addr = config.bind_addr()?;
    let store = Store::open(config.database_path())?;

    println!("Serving standup API on http://{addr}");
    standup::api::serve(addr, store).await?;
    Ok(())
}

async fn handle_submit(config: &Config, cmd: standup::cli::SubmitCommand) -> anyhow::Result<()> {
    let form = EntryForm {
        name: cmd.name,
        yesterday: cmd.yesterday,
        today: cmd.today,
        blockers: cmd.blockers.unwrap_or_default(),
        date: cmd.date,
    };
    let payload = form.finish(Local::now().date_naive())?;

    let mut session = Session::new(ApiClient::new(config.base_url()));
    let entry = session.submit(&payload).await?;

    println!("Submitted standup for {} on {}", entry.name, entry.date);
    println!("  id: {}", entry.id);
    Ok(())
}

async fn handle_list(config: &Config, cmd: &standup::cli::ListCommand) -> anyhow::Result<()> {
    let mut session = Session::new(ApiClient::new(config.base_url()));
    session.load().await;

    if let standup::LoadState::Failed(message) = session.state() {
        anyhow::bail!("failed to load standups: {message} (is the server running?)");
    }

    match cmd.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(session.entries())?);
        }
        OutputFormat::Grouped => {
            let today = Local::now().date_naive();
            let summary = view::today_summary(session.entries(), today);
            println!(
                "Today: {} update(s) from {} member(s), {} active blocker(s)",
                summary.updates, summary.members, summary.blockers
            );
            println!();
            print!("{}", view::render(session.entries(), today));
        }
    }
    Ok(())
}

async fn handle_show(config: &Config, cmd: &standup::cli::ShowCommand) -> anyhow::Result<()> {
    let client = ApiClient::new(config.base_url());
    let entry = client.get(&cmd.id).await?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        println!("{} — {}", entry.name, entry.date);
        println!("  Yesterday: {}", entry.yesterday);
        println!("  Today:     {}", entry.today);
        if let Some(blockers) = entry.blockers.as_deref() {
            println!("  Blockers:  {blockers}");
        }
        println!("  Submitted: {}", entry.created_at.to_rfc3339());
    }
    Ok(())
}

async fn handle_delete(config: &Config, cmd: &standup::cli::DeleteCommand) -> anyhow::Result<()> {
    let client = ApiClient::new(config.base_url());
    client.delete(&cmd.id).await?;
    println!("Deleted standup {}", cmd.id);
    Ok(())
}

async fn handle_clear(config: &Config, cmd: &standup::cli::ClearCommand) -> anyhow::Result<()> {
    if !cmd.yes {
        println!("This will remove all standup entries.");
        println!("Use --yes to confirm.");
        return Ok(());
    }

    let mut session = Session::new(ApiClient::new(config.base_url()));
    session.clear_all().await?;
    println!("All standups cleared.");
    Ok(())
}

fn handle_status(config: &Config, cmd: &standup::cli::StatusCommand) -> anyhow::Result<()> {
    let store = Store::open(config.database_path())?;
    let stats = store.stats()?;

    if cmd.json {
        let status = serde_json::json!({
            "database_path": config.database_path(),
            "total_entries": stats.total_entries,
            "distinct_dates": stats.distinct_dates,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("standup status");
        println!("--------------");
        println!("Database:       {}", config.database_path().display());
        println!("Total entries:  {}", stats.total_entries);
        println!("Distinct dates: {}", stats.distinct_dates);
        println!("Database size:  {} bytes", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Host:          {}", config.server.host);
                println!("  Port:          {}", config.server.port);
                println!();
                println!("[Storage]");
                println!("  Database path: {}", config.database_path().display());
                println!();
                println!("[Client]");
                println!("  Base URL:      {}", config.base_url());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
