//! Watch mode: refresh on every change of the input or the config file

use crate::dashboard::Dashboard;
use crate::error::AppResult;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use salesdash_i18n::fluent_args;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Editors touch a file several times per save; changes within this window
/// trigger one refresh.
const DEBOUNCE: Duration = Duration::from_millis(250);

/// Which watched files changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    pub input: bool,
    pub config: bool,
}

impl Changes {
    fn merge(&mut self, other: Self) {
        self.input |= other.input;
        self.config |= other.config;
    }

    fn any(self) -> bool {
        self.input || self.config
    }
}

/// Absolute paths of the watched files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTargets {
    input: PathBuf,
    config: Option<PathBuf>,
}

impl WatchTargets {
    /// Resolve both paths; the files must exist
    pub fn resolve(input: &Path, config: Option<&Path>) -> AppResult<Self> {
        Ok(Self::new(
            std::fs::canonicalize(input)?,
            config.map(std::fs::canonicalize).transpose()?,
        ))
    }

    pub const fn new(input: PathBuf, config: Option<PathBuf>) -> Self {
        Self { input, config }
    }

    /// Parent directories to watch; files are replaced on save, so watching
    /// the file itself would lose track of it
    pub fn directories(&self) -> BTreeSet<PathBuf> {
        std::iter::once(&self.input)
            .chain(self.config.as_ref())
            .filter_map(|p| p.parent().map(Path::to_path_buf))
            .collect()
    }

    /// Changes carried by `event`, if it touches a watched file
    pub fn classify(&self, event: &Event) -> Option<Changes> {
        if !(event.kind.is_modify() || event.kind.is_create()) {
            return None;
        }
        let changes = Changes {
            input: event.paths.iter().any(|p| *p == self.input),
            config: self
                .config
                .as_ref()
                .is_some_and(|config| event.paths.iter().any(|p| p == config)),
        };
        changes.any().then_some(changes)
    }
}

/// File-system watcher feeding a channel.
pub struct FileWatcher {
    // Dropping the watcher stops the events
    _watcher: RecommendedWatcher,
    events: mpsc::UnboundedReceiver<Changes>,
}

impl FileWatcher {
    pub fn new(targets: WatchTargets) -> AppResult<Self> {
        let (tx, events) = mpsc::unbounded_channel();
        let directories = targets.directories();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Some(changes) = targets.classify(&event) {
                    debug!(?changes, kind = ?event.kind, "Watched file changed");
                    if tx.send(changes).is_err() {
                        debug!("Watch loop gone, dropping event");
                    }
                }
            }
            Err(e) => warn!(error = %e, "File watcher error"),
        })?;

        for directory in &directories {
            watcher.watch(directory, RecursiveMode::NonRecursive)?;
            debug!(directory = %directory.display(), "Watching directory");
        }

        Ok(Self {
            _watcher: watcher,
            events,
        })
    }

    /// Next burst of changes, merged; `None` once the watcher is gone
    pub async fn next(&mut self) -> Option<Changes> {
        let mut changes = self.events.recv().await?;
        tokio::time::sleep(DEBOUNCE).await;
        while let Ok(more) = self.events.try_recv() {
            changes.merge(more);
        }
        Some(changes)
    }
}

/// Refresh `dashboard` on every change until Ctrl-C.
pub async fn watch<W: Write>(dashboard: &mut Dashboard, out: &mut W) -> AppResult<()> {
    let targets = WatchTargets::resolve(dashboard.input(), dashboard.config_path())?;
    let mut watcher = FileWatcher::new(targets)?;

    let localizer = dashboard.session().localizer();
    writeln!(
        out,
        "{}",
        localizer.message_with(
            "watch-started",
            &fluent_args!["path" => dashboard.input().display().to_string()],
        )
    )?;
    info!(input = %dashboard.input().display(), "Watch mode started");

    loop {
        tokio::select! {
            changes = watcher.next() => {
                let Some(changes) = changes else {
                    warn!("File watcher stopped");
                    break;
                };
                if changes.config {
                    dashboard.reload_config(out)?;
                }
                dashboard.run_once(out)?;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl-C received; leaving watch mode");
                break;
            }
        }
    }

    writeln!(out, "{}", dashboard.session().localizer().message("watch-stopped"))?;
    Ok(())
}
