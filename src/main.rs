use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use updateflow::app::App;
use updateflow::catalog::{load_catalog, Catalog};
use updateflow::config::Config;
use updateflow::impact::{total_device_count, workflows_for_version, ImpactedWorkflow, UploadType};
use updateflow::logging;
use updateflow::navigation::{Action, NavConfig, Step};
use updateflow::selection::SelectionState;
use updateflow::session::SessionStore;
use updateflow::ui::terminal_guard::install_panic_hook;

#[derive(Parser)]
#[command(name = "updateflow")]
#[command(about = "Review how an app upload impacts device workflows")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List applications in the catalog
    Apps,

    /// Print the latest uploaded version of an application
    Latest {
        /// Application name
        app: String,
    },

    /// Show workflows impacted by uploading a version
    Impact {
        /// Application name
        app: String,

        /// Uploaded version
        #[arg(long)]
        version: String,

        /// Upload as a specific version instead of the new latest
        #[arg(long)]
        specific: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the page a button leads to
    Resolve {
        /// Page step (listView, step1, step1Empty, step2, success, error)
        step: Step,

        /// Button (start, cancel, next, back, publish, done, retry)
        action: Action,

        /// Stored update method id
        #[arg(long)]
        method: Option<String>,

        /// Number of impacted workflows for the current upload
        #[arg(long)]
        impacted: Option<usize>,
    },

    /// Inspect or remove leftover session files
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },

    /// Write or print the configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write the effective configuration to .updateflow/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration as TOML
    Show,
}

#[derive(Subcommand)]
enum SessionCommands {
    /// List session files and their values
    Show,
    /// Delete all session files
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    let is_tui_mode = cli.command.is_none();

    // Initialize logging (file-based for TUI, stderr for CLI)
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Apps) => cmd_apps(&config)?,
        Some(Commands::Latest { app }) => cmd_latest(&config, &app)?,
        Some(Commands::Impact {
            app,
            version,
            specific,
            json,
        }) => {
            let upload_type = if specific {
                UploadType::Specific
            } else {
                UploadType::Latest
            };
            cmd_impact(&config, &app, upload_type, &version, json)?;
        }
        Some(Commands::Resolve {
            step,
            action,
            method,
            impacted,
        }) => cmd_resolve(step, action, method, impacted)?,
        Some(Commands::Session { command }) => cmd_session(&config, command)?,
        Some(Commands::Config { command }) => cmd_config(&config, command)?,
        None => {
            // No subcommand = launch the TUI
            run_tui(config, logging_handle.log_file_path).await?;
        }
    }

    Ok(())
}

fn catalog_for(config: &Config) -> Result<Catalog> {
    load_catalog(config.catalog_path().as_deref()).context("Failed to load catalog")
}

async fn run_tui(config: Config, log_file_path: Option<PathBuf>) -> Result<()> {
    let catalog = catalog_for(&config)?;
    install_panic_hook();

    let mut app = App::new(config, catalog);
    let result = app.run().await;

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if let Ok(metadata) = log_path.metadata() {
            if metadata.len() > 0 {
                eprintln!("Session log: {}", log_path.display());
            }
        }
    }

    result
}

fn cmd_apps(config: &Config) -> Result<()> {
    let catalog = catalog_for(config)?;
    if catalog.is_empty() {
        println!("No applications");
        return Ok(());
    }

    println!("{:<24} {:<12} {:>9}", "Application", "Latest", "Workflows");
    println!("{}", "─".repeat(47));
    for app in &catalog.applications {
        println!(
            "{:<24} {:<12} {:>9}",
            app.name,
            app.latest_version().unwrap_or("-"),
            app.workflows.len()
        );
    }
    Ok(())
}

fn cmd_latest(config: &Config, app: &str) -> Result<()> {
    let catalog = catalog_for(config)?;
    if catalog.application(app).is_none() {
        bail!("Unknown application '{}'", app);
    }
    match catalog.latest_version(app) {
        Some(version) => println!("{}", version),
        None => println!("No uploaded versions"),
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImpactReport<'a> {
    app: &'a str,
    upload_type: UploadType,
    upload_version: &'a str,
    workflows: &'a [ImpactedWorkflow],
    total_devices: u64,
}

fn cmd_impact(
    config: &Config,
    app: &str,
    upload_type: UploadType,
    version: &str,
    json: bool,
) -> Result<()> {
    let catalog = catalog_for(config)?;
    let workflows = workflows_for_version(&catalog, app, upload_type, version);
    let total_devices = total_device_count(&workflows);

    if json {
        let report = ImpactReport {
            app,
            upload_type,
            upload_version: version,
            workflows: &workflows,
            total_devices,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if workflows.is_empty() {
        println!("No workflows impacted by {} v{} ({})", app, version, upload_type);
        return Ok(());
    }

    println!(
        "{:<34} {:<8} {:<12} {:<20} {:>7}",
        "Name", "Version", "Type", "Version Mode", "Devices"
    );
    println!("{}", "─".repeat(85));
    for item in &workflows {
        println!(
            "{:<34} {:<8} {:<12} {:<20} {:>7}",
            item.workflow.name,
            item.workflow.version,
            item.workflow.kind,
            item.version_mode,
            item.workflow.devices
        );
    }
    println!("{}", "─".repeat(85));
    println!(
        "{} workflows, {} devices",
        workflows.len(),
        total_devices
    );
    Ok(())
}

fn cmd_resolve(
    step: Step,
    action: Action,
    method: Option<String>,
    impacted: Option<usize>,
) -> Result<()> {
    let selection = SelectionState {
        selected_method: method,
        impacted_count: impacted,
        ..SelectionState::default()
    };

    match NavConfig::default().resolve(step, action, &selection) {
        Some(page) => println!("{}", page.file_name()),
        None => bail!("No '{}' action on {}", action, step),
    }
    Ok(())
}

fn cmd_session(config: &Config, command: SessionCommands) -> Result<()> {
    let sessions_dir = config.sessions_path();
    match command {
        SessionCommands::Show => {
            let sessions = SessionStore::list(&sessions_dir)?;
            if sessions.is_empty() {
                println!("No sessions");
                return Ok(());
            }
            for session in sessions {
                println!("{}  started {}", session.id, session.started_at.to_rfc3339());
                for (key, value) in session.values() {
                    println!("    {}: {}", key, value);
                }
            }
        }
        SessionCommands::Clear => {
            let removed = SessionStore::clear_all(&sessions_dir)?;
            println!("Removed {} session file(s)", removed);
        }
    }
    Ok(())
}

fn cmd_config(config: &Config, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Init { force } => {
            let path = Config::local_config_path();
            if path.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            let written = config.save()?;
            println!("Wrote {}", written.display());
        }
        ConfigCommands::Show => print!("{}", config.to_toml()?),
    }
    Ok(())
}
