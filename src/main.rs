//! agent-picker - choose which research agent to run

use agent_picker::config::Config;
use agent_picker::picker::{self, Handler};
use agent_picker::{
    AgentProvider, FileStore, KeyValueStore, MemoryStore, SelectionStore, get_agent_name,
    list_agents,
};
use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Pick the research agent used by Deep Researcher
#[derive(Parser)]
#[command(name = "agent-picker")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Selection store file (overrides config and AGENT_PICKER_STORE)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Keep the selection in memory for this run only
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available agents in menu order
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the currently selected agent
    Current,
    /// Select an agent by id
    Select {
        /// Agent id
        id: String,
    },
    /// Print the display name for an agent id
    Name {
        /// Agent id
        id: String,
    },
    /// Forget the saved selection
    Reset,
    /// Show the effective configuration
    Config {
        /// Print the config file path instead
        #[arg(long)]
        path: bool,
    },
}

#[derive(Serialize)]
struct ListEntry {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    current: bool,
}

fn main() -> Result<()> {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Let --help and --version exit normally
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                e.exit();
            }
            // For actual errors, show error + help
            eprintln!("error: {}\n", e.kind());
            Cli::command().print_help()?;
            std::process::exit(1);
        }
    };

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_default(&config_path)?;
    if let Some(store) = cli
        .store
        .clone()
        .or_else(|| std::env::var_os("AGENT_PICKER_STORE").map(PathBuf::from))
    {
        config.store_path = Some(store);
    }

    let session = Session {
        config: &config,
        ephemeral: cli.ephemeral,
    };

    match cli.command {
        Some(Commands::List { json }) => cmd_list(&session, json),
        Some(Commands::Current) => {
            cmd_current(&session);
            Ok(())
        }
        Some(Commands::Select { id }) => cmd_select(&session, &id),
        Some(Commands::Name { id }) => {
            println!("{}", get_agent_name(&id));
            Ok(())
        }
        Some(Commands::Reset) => cmd_reset(&session),
        Some(Commands::Config { path }) => cmd_config(&config, &config_path, path),
        None => cmd_pick(&session),
    }
}

/// Log to `<temp>/agent-picker.log`; DEBUG=0-3 controls verbosity
/// (0=off, 1=warn, 2=info, 3=debug).
fn init_logging() {
    let debug_level = std::env::var("DEBUG")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(0);

    if debug_level == 0 {
        return;
    }

    let level = match debug_level {
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    let log_path = agent_picker::paths::log_path();
    let dir = log_path
        .parent()
        .map_or_else(std::env::temp_dir, std::path::Path::to_path_buf);
    let file_appender = tracing_appender::rolling::never(dir, "agent-picker.log");
    tracing_subscriber::fmt()
        .with_writer(file_appender)
        .with_max_level(level)
        .with_ansi(false)
        .init();
}

/// Where one CLI run keeps its selection
struct Session<'a> {
    config: &'a Config,
    ephemeral: bool,
}

impl Session<'_> {
    fn backend(&self) -> Box<dyn KeyValueStore> {
        if self.ephemeral {
            tracing::debug!("Using in-memory selection store");
            Box::new(MemoryStore::new())
        } else {
            Box::new(FileStore::new(self.config.store_path()))
        }
    }

    fn create_store(&self) -> SelectionStore<Box<dyn KeyValueStore>> {
        SelectionStore::create(self.backend(), self.config.selection_options())
    }

    fn open_store(&self) -> SelectionStore<Box<dyn KeyValueStore>> {
        SelectionStore::open(self.backend(), self.config.selection_options())
    }

    fn ensure_persisted(&self, persisted: bool) -> Result<()> {
        if !persisted {
            bail!(
                "Failed to save agent selection to {}",
                self.config.store_path().display()
            );
        }
        Ok(())
    }
}

fn cmd_list(session: &Session<'_>, json: bool) -> Result<()> {
    let store = session.open_store();
    let current = store.read();

    if json {
        let entries: Vec<ListEntry> = list_agents()
            .iter()
            .map(|agent| ListEntry {
                id: agent.id,
                name: agent.name,
                description: agent.description,
                current: agent.id == current,
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&entries).context("Failed to serialize agent list")?
        );
        return Ok(());
    }

    for agent in list_agents() {
        let marker = if agent.id == current { "*" } else { " " };
        println!(
            "{marker} {:<27} {:<24} {}",
            agent.id, agent.name, agent.description
        );
    }
    Ok(())
}

fn cmd_current(session: &Session<'_>) {
    let store = session.open_store();
    let current = store.read();
    println!("{current}\t{}", get_agent_name(current));
}

fn cmd_select(session: &Session<'_>, id: &str) -> Result<()> {
    let mut store = session.open_store();
    store.select(id)?;
    session.ensure_persisted(store.is_persisted())?;
    println!("Agent set to {}", get_agent_name(store.read()));
    Ok(())
}

fn cmd_reset(session: &Session<'_>) -> Result<()> {
    let mut store = session.open_store();
    store.reset();
    session.ensure_persisted(store.is_persisted())?;
    println!("Agent selection reset to {}", get_agent_name(store.read()));
    Ok(())
}

fn cmd_config(config: &Config, config_path: &std::path::Path, path: bool) -> Result<()> {
    if path {
        println!("{}", config_path.display());
        return Ok(());
    }
    println!(
        "{}",
        serde_json::to_string_pretty(config).context("Failed to serialize config")?
    );
    Ok(())
}

fn cmd_pick(session: &Session<'_>) -> Result<()> {
    let mut provider = AgentProvider::with_store(session.create_store());
    let handler = Handler::new(session.config.tick_rate_ms);

    let chosen = picker::run(&provider, &handler)?;
    let persisted = provider.use_agent()?.is_persisted()?;
    if provider.dispose().is_none() {
        tracing::warn!("Selection store was still in use when the picker closed");
    }

    if let Some(agent) = chosen {
        session.ensure_persisted(persisted)?;
        println!("Agent set to {}", agent.name);
    }
    Ok(())
}
