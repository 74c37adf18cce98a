//! Watch loop implementation
//!
//! Runs as a tokio task that drains a command queue in order. Rescans are
//! moved onto the blocking pool so a slow disk does not stall the runtime, but
//! the loop still waits for each one before taking the next command.

use super::{WatchCommand, WatchEvent};
use crate::config::WatcherConfig;
use crate::watcher::FolderRegistry;
use crate::{Result, WatcherError};
use fsprobe::FileSystemProbe;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

/// Whether the loop should keep going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    Continue,
    Stop,
}

/// Cloneable handle for feeding commands into a running loop
#[derive(Debug, Clone)]
pub struct WatchHandle {
    command_tx: mpsc::Sender<WatchCommand>,
    event_tx: broadcast::Sender<WatchEvent>,
}

impl WatchHandle {
    /// Queue a command
    ///
    /// # Errors
    /// Fails once the loop has stopped.
    pub async fn send(&self, command: WatchCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| WatcherError::Other("Watch loop is not running".to_string()))
    }

    /// Subscribe to watch events
    pub fn subscribe(&self) -> broadcast::Receiver<WatchEvent> {
        self.event_tx.subscribe()
    }

    pub async fn adjust(&self, root: impl Into<PathBuf>) -> Result<()> {
        self.send(WatchCommand::Adjust(root.into())).await
    }

    pub async fn created(&self, path: impl Into<PathBuf>) -> Result<()> {
        self.send(WatchCommand::Created(path.into())).await
    }

    pub async fn deleted(&self, path: impl Into<PathBuf>) -> Result<()> {
        self.send(WatchCommand::Deleted(path.into())).await
    }

    pub async fn ignore(&self, path: impl Into<PathBuf>) -> Result<()> {
        self.send(WatchCommand::Ignore(path.into())).await
    }

    pub async fn reinstate(&self, path: impl Into<PathBuf>) -> Result<()> {
        self.send(WatchCommand::Reinstate(path.into())).await
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.send(WatchCommand::Shutdown).await
    }
}

/// Serializes watch commands onto a single registry
pub struct WatchLoop<P: FileSystemProbe> {
    registry: Arc<FolderRegistry<P>>,
    command_rx: Option<mpsc::Receiver<WatchCommand>>,
    event_tx: broadcast::Sender<WatchEvent>,
    running: bool,
}

impl<P: FileSystemProbe + 'static> WatchLoop<P> {
    /// Create a loop around `registry` and the handle that drives it
    pub fn new(registry: Arc<FolderRegistry<P>>, config: &WatcherConfig) -> (Self, WatchHandle) {
        let (command_tx, command_rx) = mpsc::channel(config.command_channel_capacity.max(1));
        let (event_tx, _) = broadcast::channel(config.event_channel_capacity.max(1));

        let handle = WatchHandle {
            command_tx,
            event_tx: event_tx.clone(),
        };

        let watch_loop = Self {
            registry,
            command_rx: Some(command_rx),
            event_tx,
            running: false,
        };

        (watch_loop, handle)
    }

    pub fn registry(&self) -> &Arc<FolderRegistry<P>> {
        &self.registry
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Subscribe to watch events
    pub fn subscribe(&self) -> broadcast::Receiver<WatchEvent> {
        self.event_tx.subscribe()
    }

    fn send_event(&self, event: WatchEvent) {
        // No subscribers is fine.
        let _ = self.event_tx.send(event);
    }

    /// Apply one command synchronously
    pub fn apply(&self, command: WatchCommand) -> CommandResult {
        match command {
            WatchCommand::Adjust(root) => {
                let result = self.registry.adjust(&root);
                self.report_adjust(root, result);
            }
            WatchCommand::Created(path) => {
                if self.registry.creation(&path) {
                    self.send_event(WatchEvent::FolderAdded { path });
                }
            }
            WatchCommand::Deleted(path) => {
                if self.registry.deletion(&path) {
                    self.send_event(WatchEvent::FolderRemoved { path });
                }
            }
            WatchCommand::Ignore(path) => {
                if self.registry.ignore(&path) {
                    self.send_event(WatchEvent::FolderIgnored { path });
                }
            }
            WatchCommand::Reinstate(path) => {
                if self.registry.reinstate(&path) {
                    self.send_event(WatchEvent::FolderReinstated { path });
                }
            }
            WatchCommand::Shutdown => {
                tracing::info!("Received shutdown command");
                return CommandResult::Stop;
            }
        }
        CommandResult::Continue
    }

    fn report_adjust(&self, root: PathBuf, result: Result<()>) {
        match result {
            Ok(()) => {
                let folders = self.registry.len();
                self.send_event(WatchEvent::Adjusted { root, folders });
            }
            Err(e) => {
                tracing::warn!(root = %root.display(), error = %e, "Rescan failed");
                self.send_event(WatchEvent::Error {
                    message: e.to_string(),
                });
            }
        }
    }

    /// Handle a command, running rescans on the blocking pool
    async fn handle_command(&self, command: WatchCommand) -> CommandResult {
        match command {
            WatchCommand::Adjust(root) => {
                let registry = Arc::clone(&self.registry);
                let scan_root = root.clone();
                let result = tokio::task::spawn_blocking(move || registry.adjust(&scan_root))
                    .await
                    .unwrap_or_else(|e| Err(WatcherError::Other(format!("Rescan task failed: {}", e))));
                self.report_adjust(root, result);
                CommandResult::Continue
            }
            other => self.apply(other),
        }
    }

    /// Run until a shutdown command arrives or every handle is dropped
    pub async fn run(&mut self) -> Result<()> {
        let mut command_rx = self
            .command_rx
            .take()
            .ok_or_else(|| WatcherError::Other("Watch loop already running".to_string()))?;

        self.running = true;
        tracing::info!("Watch loop started");

        while let Some(command) = command_rx.recv().await {
            tracing::trace!(?command, "Processing watch command");
            if self.handle_command(command).await == CommandResult::Stop {
                break;
            }
        }

        self.running = false;
        self.send_event(WatchEvent::Stopped);
        tracing::info!(folders = self.registry.len(), "Watch loop stopped");
        Ok(())
    }
}
