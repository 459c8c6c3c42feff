//! Filesystem observer.
//!
//! A notify watcher on the flows directory. Its callback runs on notify's
//! own thread and only forwards qualifying events to the watch loop; it
//! never builds anything itself.

use std::{
    path::{Path, PathBuf},
    sync::mpsc::Sender,
    time::Instant,
};

use eyre::{Context, Result};
use flowc_dialect::Dialect;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Messages consumed by the watch loop.
#[derive(Debug)]
pub enum WatchMessage {
    /// A specification file was created, modified or removed.
    Changed { path: PathBuf, at: Instant },
    /// The observer reported an error.
    Error(notify::Error),
    /// Stop watching once any in-flight cycle has finished.
    Interrupt,
}

/// The first path in `event` that should trigger a rebuild: a file directly
/// inside `flows_dir` with a dialect extension, created, modified or
/// removed.
pub fn qualifying_path<'a>(event: &'a Event, flows_dir: &Path) -> Option<&'a Path> {
    let relevant = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );
    if !relevant {
        return None;
    }
    event
        .paths
        .iter()
        .map(PathBuf::as_path)
        .find(|path| path.parent() == Some(flows_dir) && Dialect::from_path(path).is_some())
}

/// Start observing `flows_dir`. Dropping the returned watcher stops the
/// observer and joins its thread.
pub fn observe(flows_dir: &Path, tx: Sender<WatchMessage>) -> Result<RecommendedWatcher> {
    let dir = flows_dir
        .canonicalize()
        .wrap_err_with(|| format!("cannot watch '{}'", flows_dir.display()))?;

    let callback_dir = dir.clone();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        let message = match res {
            Ok(event) => match qualifying_path(&event, &callback_dir) {
                Some(path) => WatchMessage::Changed {
                    path: path.to_path_buf(),
                    at: Instant::now(),
                },
                None => return,
            },
            Err(err) => WatchMessage::Error(err),
        };
        // The loop has exited; nothing left to notify.
        let _ = tx.send(message);
    })
    .wrap_err("failed to create filesystem watcher")?;

    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .wrap_err_with(|| format!("failed to watch '{}'", dir.display()))?;

    tracing::info!(dir = %dir.display(), "watching for specification changes");
    Ok(watcher)
}

#[cfg(test)]
mod tests {
    use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind};

    use super::*;

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_qualifying_events() {
        let dir = Path::new("/app/src/flows");
        for kind in [
            EventKind::Create(CreateKind::File),
            EventKind::Modify(ModifyKind::Any),
            EventKind::Remove(RemoveKind::File),
        ] {
            let event = event(kind, "/app/src/flows/todo.flow");
            assert_eq!(
                qualifying_path(&event, dir),
                Some(Path::new("/app/src/flows/todo.flow"))
            );
        }
    }

    #[test]
    fn test_ignored_events() {
        let dir = Path::new("/app/src/flows");
        let cases = [
            event(EventKind::Access(AccessKind::Any), "/app/src/flows/todo.flow"),
            event(EventKind::Modify(ModifyKind::Any), "/app/src/flows/notes.md"),
            event(EventKind::Modify(ModifyKind::Any), "/app/src/flows/.todo.flow.swp"),
            event(EventKind::Create(CreateKind::File), "/app/src/flows/sub/deep.flow"),
            event(EventKind::Create(CreateKind::File), "/app/dist/todo.flow"),
        ];
        for event in &cases {
            assert_eq!(qualifying_path(event, dir), None, "{:?}", event.paths);
        }
    }

    #[test]
    fn test_observe_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, _rx) = std::sync::mpsc::channel();
        let err = observe(&dir.path().join("nope"), tx).unwrap_err();
        assert!(err.to_string().starts_with("cannot watch"));
    }
}
