//! refwatch - git reference change watcher
//!
//! CLI entry point: runs one poller per repository and prints the event stream.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result, eyre};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use refwatch::cli::{Cli, Command, OutputFormat};
use refwatch::config::{Config, RepoConfig};
use refwatch::domain::{ChangeKind, RefChange, RefState};
use refwatch::lister::{GitCliLister, RefLister};
use refwatch::watcher::{PollError, poll_repository};

fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("refwatch")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Log to a file; stdout carries the event stream
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("refwatch.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Watch {
            repos,
            interval_ms,
            format,
        } => cmd_watch(config, repos, interval_ms, format).await,
        Command::List { path, format } => cmd_list(&path, format).await,
    }
}

/// Watch every repository until a signal arrives or all watchers have stopped
async fn cmd_watch(
    mut config: Config,
    repos: Vec<RepoConfig>,
    interval_ms: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    if !repos.is_empty() {
        config.repos = repos;
    }
    if let Some(interval_ms) = interval_ms {
        config.watcher.poll_interval_ms = interval_ms;
    }
    config.validate().context("Invalid configuration")?;

    if config.repos.is_empty() {
        return Err(eyre!("No repositories to watch. Pass --repo or add repos to the config file"));
    }

    let (event_tx, mut event_rx) = mpsc::channel::<RefChange>(config.watcher.channel_capacity);
    let mut shutdown_txs = Vec::with_capacity(config.repos.len());
    let mut handles: Vec<JoinHandle<Result<(), PollError>>> = Vec::with_capacity(config.repos.len());

    for repo in &config.repos {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
        let lister: Arc<dyn RefLister> = Arc::new(GitCliLister::new(&repo.path));

        handles.push(tokio::spawn(poll_repository(
            repo.name.clone(),
            lister,
            event_tx.clone(),
            config.watcher.poll_interval(),
            shutdown_rx,
        )));
        shutdown_txs.push(shutdown_tx);
    }

    // Only the pollers hold senders now, so the stream ends when the last one stops
    drop(event_tx);

    info!(repos = config.repos.len(), "Watching repositories. Press Ctrl+C to stop.");

    let shutdown = wait_for_shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            change = event_rx.recv() => match change {
                Some(change) => print_change(&change, format)?,
                None => {
                    warn!("All watchers stopped");
                    break;
                }
            },
            signal = &mut shutdown => {
                signal?;
                for shutdown_tx in &shutdown_txs {
                    let _ = shutdown_tx.send(()).await;
                }
                // Flush whatever the pollers emitted before they saw the signal
                while let Some(change) = event_rx.recv().await {
                    print_change(&change, format)?;
                }
                break;
            }
        }
    }

    let mut failures = 0;
    for handle in handles {
        match handle.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                failures += 1;
                eprintln!("{} {}", "Watcher stopped:".red(), e);
            }
            Err(e) => {
                failures += 1;
                eprintln!("{} {}", "Watcher task failed:".red(), e);
            }
        }
    }

    info!("refwatch shutting down");

    if failures > 0 {
        return Err(eyre!("{} of {} watcher(s) failed", failures, config.repos.len()));
    }
    Ok(())
}

/// Print the current references of one repository
async fn cmd_list(path: &Path, format: OutputFormat) -> Result<()> {
    let lister = GitCliLister::new(path);
    let refs = lister
        .list_refs()
        .await
        .context(format!("Failed to list references in {}", path.display()))?;

    for state in &refs {
        print_ref(state, format)?;
    }
    Ok(())
}

async fn wait_for_shutdown_signal() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::select! {
            _ = sigint.recv() => warn!("SIGINT received"),
            _ = sigterm.recv() => warn!("SIGTERM received"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        warn!("Ctrl+C received");
    }

    Ok(())
}

fn print_change(change: &RefChange, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(change)?),
        OutputFormat::Text => {
            let line = change.to_string();
            match change.kind() {
                ChangeKind::Created => println!("{}", line.green()),
                ChangeKind::Updated => println!("{}", line.yellow()),
                ChangeKind::Deleted => println!("{}", line.red()),
            }
        }
    }
    Ok(())
}

fn print_ref(state: &RefState, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(state)?),
        OutputFormat::Text => {
            let marker = if state.checked_out { "*".green().to_string() } else { " ".to_string() };
            println!("{} {} {}", marker, state.current.dimmed(), state.ref_name);
        }
    }
    Ok(())
}
