//! Landing Dashboard - CLI entry point
//!
//! Without a subcommand this launches the full-screen dashboard. The other
//! subcommands manage the configuration file and the saved layout, and run
//! a one-shot gold rate fetch.

use clap::{Parser, Subcommand};
use landing_dashboard::config::{default, xdg, Config, ConfigLoader};
use landing_dashboard::gold::{self, GoldPanel, GoldUpdate};
use landing_dashboard::logging::{self, LogTarget};
use landing_dashboard::store::{self, FileStore, KeyValueStore, LAYOUT_KEY};
use landing_dashboard::tui;
use std::path::PathBuf;
use std::process::ExitCode;

/// Landing Dashboard
#[derive(Parser)]
#[command(name = "ldash")]
#[command(version, about = "Terminal landing dashboard with movable widgets")]
struct Cli {
    /// Configuration file (defaults to the XDG location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands for the ldash CLI
#[derive(Subcommand)]
enum Commands {
    /// Launch the dashboard (the default)
    Tui,

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Inspect or reset the saved widget layout
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },

    /// Fetch gold rates once and print them
    Gold,
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

/// Actions for the `layout` subcommand.
#[derive(Subcommand)]
enum LayoutAction {
    /// Print the saved geometry snapshot as JSON
    Show,
    /// Delete the saved geometry so defaults apply on next start
    Reset,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => run_tui(&cli.config),
        Commands::Config { action } => run_config_command(action, &cli.config),
        Commands::Layout { action } => match load_config(&cli.config, LogDestination::Stderr) {
            Some(config) => run_layout_command(action, &config),
            None => ExitCode::FAILURE,
        },
        Commands::Gold => match load_config(&cli.config, LogDestination::Stderr) {
            Some(config) => run_gold_command(&config),
            None => ExitCode::FAILURE,
        },
    }
}

#[derive(Clone, Copy)]
enum LogDestination {
    Stderr,
    TuiLogFile,
}

/// Loads configuration and initializes logging, printing the error on failure.
fn load_config(path: &Option<PathBuf>, destination: LogDestination) -> Option<Config> {
    let config = match ConfigLoader::load(path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            return None;
        }
    };

    let level = config.logging.log_level;
    let result = match destination {
        LogDestination::Stderr => logging::init(level, LogTarget::Stderr),
        LogDestination::TuiLogFile => {
            let log_path = config.tui_log_path();
            logging::init(level, LogTarget::File(&log_path))
        }
    };
    if let Err(e) = result {
        eprintln!("Warning: logging disabled: {e}");
    }
    Some(config)
}

fn run_tui(config_path: &Option<PathBuf>) -> ExitCode {
    // The alternate screen owns the terminal, so logs go to a file.
    let Some(config) = load_config(config_path, LogDestination::TuiLogFile) else {
        return ExitCode::FAILURE;
    };
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = rt.block_on(tui::launch(&config)) {
        eprintln!("TUI error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run_config_command(action: ConfigAction, config_path: &Option<PathBuf>) -> ExitCode {
    let result = match action {
        ConfigAction::Init { force } => {
            let _ = logging::init(Default::default(), LogTarget::Stderr);
            let created = match config_path {
                Some(path) => default::create_default_config_at(path, force).map(|()| path.clone()),
                None => default::create_default_config(force),
            };
            created.map(|path| println!("Created configuration at {}", path.display()))
        }
        ConfigAction::Path => {
            let path = config_path.clone().unwrap_or_else(xdg::config_path);
            println!("{}", path.display());
            Ok(())
        }
        ConfigAction::Validate => ConfigLoader::load(config_path.as_deref()).map(|config| {
            println!("Configuration is valid");
            println!("{config:#?}");
        }),
    };
    if let Err(e) = result {
        eprintln!("Config error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run_layout_command(action: LayoutAction, config: &Config) -> ExitCode {
    let mut store = FileStore::open(config.storage_path());
    match action {
        LayoutAction::Show => match store::load_snapshot(&store) {
            Some(snapshot) => match snapshot.to_json() {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Error: cannot encode layout: {e}");
                    return ExitCode::FAILURE;
                }
            },
            None => println!("No saved layout in {}", store.path().display()),
        },
        LayoutAction::Reset => {
            if let Err(e) = store.remove(LAYOUT_KEY) {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
            println!("Layout reset; defaults apply on next start");
        }
    }
    ExitCode::SUCCESS
}

fn run_gold_command(config: &Config) -> ExitCode {
    let client = match gold::client_from_config(&config.gold) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let update = rt.block_on(gold::fetch_update(&client));
    let failure = match &update {
        GoldUpdate::Failed { reason } => Some(reason.clone()),
        _ => None,
    };
    let mut panel = GoldPanel::new(&config.gold);
    panel.apply(update);

    match panel.fallback_note() {
        Some(note) => println!("Gold rates ({}, {note})", panel.status_label()),
        None => println!("Gold rates ({})", panel.status_label()),
    }
    for purity in gold_rates::Purity::ALL {
        panel.set_tab(purity);
        let rows: Vec<String> = panel
            .rows()
            .into_iter()
            .map(|(weight, price)| format!("{weight} {price}"))
            .collect();
        println!("{}: {}", purity.label(), rows.join(" | "));
    }

    match failure {
        Some(reason) => {
            eprintln!("Fetch failed: {reason}");
            ExitCode::FAILURE
        }
        None => ExitCode::SUCCESS,
    }
}
