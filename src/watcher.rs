//! Directory-watch collaborator.
//!
//! Raw `notify` events are forwarded over a channel; the refresh controller
//! turns each drained signal into a settle-delayed refresh attempt. No
//! filename filtering happens here, any change in the watched directory
//! counts.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

use anyhow::{Context as _, Result};
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, error, warn};

pub struct DirWatcher {
    watcher: RecommendedWatcher,
    rx: Receiver<()>,
    watched: Option<PathBuf>,
}

impl DirWatcher {
    /// `wake` runs on the watcher thread after a signal is queued, giving a
    /// parked GUI loop a chance to drain the channel.
    pub fn new(wake: impl Fn() + Send + 'static) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let watcher = RecommendedWatcher::new(
            move |res: notify::Result<notify::Event>| match res {
                Ok(event) => {
                    if matches!(
                        event.kind,
                        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                    ) {
                        let _ = tx.send(());
                        wake();
                    }
                }
                Err(err) => error!("directory watch error: {err:?}"),
            },
            Config::default(),
        )
        .context("Failed to create directory watcher")?;

        Ok(Self {
            watcher,
            rx,
            watched: None,
        })
    }

    /// Point the watch at `dir`, replacing the previous target when the
    /// configured image moved to another directory. A failed watch is left
    /// unset and retried on the next call.
    pub fn ensure_watched(&mut self, dir: &Path) {
        if self.watched.as_deref() == Some(dir) {
            return;
        }
        if let Some(old) = self.watched.take() {
            if let Err(err) = self.watcher.unwatch(&old) {
                debug!(dir = %old.display(), "failed to unwatch stale directory: {err}");
            }
        }
        match self.watcher.watch(dir, RecursiveMode::NonRecursive) {
            Ok(()) => {
                debug!(dir = %dir.display(), "watching directory");
                self.watched = Some(dir.to_path_buf());
            }
            Err(err) => warn!(dir = %dir.display(), "failed to watch directory: {err}"),
        }
    }

    /// Number of raw change signals queued since the last drain.
    pub fn drain_signals(&self) -> usize {
        let mut count = 0;
        while self.rx.try_recv().is_ok() {
            count += 1;
        }
        count
    }
}
