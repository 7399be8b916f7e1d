use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use strikes_core::config::Config;
use strikes_genai::StrikeWriter;
use tokio::sync::broadcast;

use crate::notify::{self, NotificationBoard};
use crate::tracker::{self, Tracker};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub config: Arc<Config>,
    pub tracker: Arc<Mutex<Tracker>>,
    pub writer: StrikeWriter,
    pub board: NotificationBoard,
    pub event_tx: broadcast::Sender<()>,
}

impl AppState {
    /// Load config and roster from `root`, with the writer the config describes.
    pub fn new(root: PathBuf) -> anyhow::Result<Self> {
        let config = Config::load(&root)?;
        let writer = tracker::writer_for(&config.genai);
        Self::with_writer(root, config, writer)
    }

    pub fn with_writer(root: PathBuf, config: Config, writer: StrikeWriter) -> anyhow::Result<Self> {
        let (tx, _) = broadcast::channel(64);
        let board = NotificationBoard::new(Duration::from_secs(config.celebration.display_secs))
            .with_events(tx.clone());
        let mut tracker = Tracker::open(&root, &config)?;

        // Guard: only spawn if inside a Tokio runtime (skipped in sync unit tests).
        if tokio::runtime::Handle::try_current().is_ok() {
            let (celebrations, _handle) = notify::spawn_dispatcher(writer.clone(), board.clone());
            tracker = tracker.with_celebrations(celebrations);
        }

        Ok(Self {
            root,
            config: Arc::new(config),
            tracker: Arc::new(Mutex::new(tracker)),
            writer,
            board,
            event_tx: tx,
        })
    }

    /// Tell SSE subscribers that the roster changed.
    pub fn changed(&self) {
        let _ = self.event_tx.send(());
    }
}
