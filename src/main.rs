use anyhow::Context;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use thandie::commands::*;
use thandie::core::{
    config::Config, error::ThandieError, events::CancellationToken, logger::setup_logging,
    print_error, print_warning,
};

const EXIT_CANCELLED: u8 = 130;

#[derive(Parser)]
#[command(name = "thandie")]
#[command(about = "Inventory of the project folders in your workspace")]
#[command(version)]
struct Cli {
    /// Workspace root (overrides THANDIE_WORKSPACE and the config file)
    #[arg(short = 'w', long, global = true)]
    workspace: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the workspace and cache the result
    Scan {
        /// Include dot-prefixed directories
        #[arg(long)]
        hidden: bool,
        /// Additional directory name to skip (repeatable)
        #[arg(long, value_name = "NAME")]
        ignore: Vec<String>,
        /// Do not stream per-directory log lines
        #[arg(short, long)]
        quiet: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the cached scan result (default)
    List {
        /// Only repositories with uncommitted changes
        #[arg(long)]
        dirty: bool,
        /// Only git repositories
        #[arg(long)]
        repos: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or clear cached scan results
    Cache {
        #[command(subcommand)]
        action: CacheCommand,
    },
}

#[derive(Subcommand)]
enum CacheCommand {
    /// Show the cache directory and this workspace's entry
    Path,
    /// Remove all cached scan results
    Clear,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(e),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load()?;
    setup_logging(cli.debug, &config.logging);

    let workspace = resolve_workspace(cli.workspace.as_deref(), &config)?;

    match cli.command.unwrap_or(Commands::List {
        dirty: false,
        repos: false,
        json: false,
    }) {
        Commands::Scan {
            hidden,
            ignore,
            quiet,
            json,
        } => {
            let cancel = CancellationToken::new();
            let handler_token = cancel.clone();
            ctrlc::set_handler(move || {
                if handle_interrupt(&handler_token) {
                    std::process::exit(i32::from(EXIT_CANCELLED));
                }
            })
            .context("set Ctrl+C handler")?;

            let args = ScanArgs {
                include_hidden: hidden,
                ignore,
                quiet,
                json,
            };
            execute_scan(&workspace, &config, &args, cancel)?;
        }
        Commands::List { dirty, repos, json } => {
            execute_list(&workspace, &ListArgs { dirty, repos, json })?;
        }
        Commands::Cache { action } => match action {
            CacheCommand::Path => execute_cache_path(&workspace)?,
            CacheCommand::Clear => execute_cache_clear()?,
        },
    }

    Ok(())
}

fn report(err: anyhow::Error) -> ExitCode {
    match err.downcast_ref::<ThandieError>() {
        Some(ThandieError::ScanCancelled) => {
            print_warning("Scan cancelled, no results were saved");
            ExitCode::from(EXIT_CANCELLED)
        }
        Some(e) if e.is_cache_miss() => {
            print_error(&e.to_string());
            eprintln!("Run `thandie scan` to scan this workspace first.");
            ExitCode::FAILURE
        }
        Some(e) => {
            print_error(&e.to_string());
            ExitCode::FAILURE
        }
        None => {
            print_error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
