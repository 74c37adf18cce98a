//! folderwatch - Folder watch state tracking
//!
//! Main entry point for the folderwatch CLI.

use anyhow::Context;
use clap::{Parser, Subcommand};
use folderwatch::config::{validate_config_result, WatcherConfig};
use folderwatch::dispatch::{resolve_path, WatchCommand, WatchEvent, WatchLoop};
use folderwatch::{FolderRegistry, WatchedFolder, WatcherError};
use fsprobe::RealFileSystem;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tokio::sync::broadcast::error::RecvError;

/// folderwatch - Track the folders a test runner watches
#[derive(Parser, Debug)]
#[command(name = "folderwatch")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: ~/.config/folderwatch/config.yaml)
    #[arg(short, long, env = "FOLDERWATCH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Default root to watch
        #[arg(long)]
        root: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Scan a root once and print its watched folders
    Scan {
        /// Root folder (default: `root` from the config file)
        root: Option<PathBuf>,

        /// Folders to ignore after the scan (repeatable)
        #[arg(short, long)]
        ignore: Vec<PathBuf>,

        /// Print JSON instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// Read watch commands from stdin and print events as JSON lines
    ///
    /// Commands: adjust|created|deleted|ignore|reinstate <path>, quit
    Run {
        /// Root folder to scan before reading commands
        root: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> folderwatch::Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(WatcherConfig::default_path);

    // Init writes the config, so it must not require one
    if let Commands::Init { root, force } = cli.command {
        return handle_init_command(&config_path, root, force);
    }

    let config = WatcherConfig::load_or_default(&config_path)?;
    validate_config_result(&config)?;

    if let Err(e) = folderwatch::logging::init_with_filter(&config.log_filter) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match cli.command {
        Commands::Init { .. } => Ok(()),
        Commands::Scan { root, ignore, json } => {
            let root = resolve_root(root, &config)?;
            handle_scan_command(&root, &ignore, json)
        }
        Commands::Run { root } => {
            let root = root.or_else(|| config.root.clone()).map(|r| resolve_path(&r));
            handle_run_command(root, &config)
        }
    }
}

fn handle_init_command(path: &Path, root: Option<PathBuf>, force: bool) -> folderwatch::Result<()> {
    if path.exists() && !force {
        return Err(WatcherError::Config(format!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        )));
    }

    let mut config = WatcherConfig::new();
    if let Some(root) = root {
        config = config.with_root(resolve_path(&root));
    }
    config.save(path)?;

    println!("Wrote {}", path.display());
    Ok(())
}

fn resolve_root(root: Option<PathBuf>, config: &WatcherConfig) -> folderwatch::Result<PathBuf> {
    root.or_else(|| config.root.clone())
        .map(|r| resolve_path(&r))
        .ok_or_else(|| {
            WatcherError::Config(
                "No root given. Pass one on the command line or set `root` in the config file"
                    .to_string(),
            )
        })
}

fn handle_scan_command(root: &Path, ignore: &[PathBuf], json: bool) -> folderwatch::Result<()> {
    let registry = FolderRegistry::new(RealFileSystem::new());
    registry.adjust(root)?;

    for path in ignore {
        let path = resolve_path(path);
        if !registry.ignore(&path) {
            tracing::warn!(path = %path.display(), "Not a watched folder, nothing to ignore");
        }
    }

    print_folders(&registry.watched_folders(), json)
}

fn print_folders(folders: &[WatchedFolder], json: bool) -> folderwatch::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(folders)?);
        return Ok(());
    }

    for folder in folders {
        let marker = if folder.active { "●" } else { "○" };
        println!("{} {:<24} {}", marker, folder.name, folder.path.display());
    }
    let active = folders.iter().filter(|f| f.active).count();
    println!("\n{} watched, {} ignored", active, folders.len() - active);
    Ok(())
}

fn handle_run_command(root: Option<PathBuf>, config: &WatcherConfig) -> folderwatch::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(run_watch_loop(root, config))
}

async fn run_watch_loop(root: Option<PathBuf>, config: &WatcherConfig) -> folderwatch::Result<()> {
    let registry = Arc::new(FolderRegistry::new(RealFileSystem::new()));
    let (mut watch_loop, handle) = WatchLoop::new(Arc::clone(&registry), config);

    let mut events = handle.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if let Ok(line) = serde_json::to_string(&event) {
                        println!("{}", line);
                    }
                    if event == WatchEvent::Stopped {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event printer fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let loop_task = tokio::spawn(async move { watch_loop.run().await });

    if let Some(root) = root {
        handle.adjust(root).await?;
    }

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read command from stdin")?
    {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.parse::<WatchCommand>() {
            Ok(WatchCommand::Shutdown) => break,
            Ok(command) => handle.send(command.resolved()).await?,
            Err(e) => eprintln!("{}", e),
        }
    }

    handle.shutdown().await?;
    loop_task
        .await
        .map_err(|e| WatcherError::Other(format!("Watch loop panicked: {}", e)))??;
    let _ = printer.await;

    tracing::info!(
        active = registry.active_folders().len(),
        ignored = registry.ignored_folders().len(),
        "Final watch set"
    );
    Ok(())
}
