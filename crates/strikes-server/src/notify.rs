use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use strikes_genai::StrikeWriter;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

// ---------------------------------------------------------------------------
// Celebration requests
// ---------------------------------------------------------------------------

/// Sent once per employee that just reached the treat threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CelebrationRequest {
    pub id: String,
    pub name: String,
}

pub type CelebrationSender = mpsc::UnboundedSender<CelebrationRequest>;

/// Spawn the task that turns celebration requests into notifications.
///
/// Requests are handled in arrival order. The task ends once every sender
/// has been dropped.
pub fn spawn_dispatcher(
    writer: StrikeWriter,
    board: NotificationBoard,
) -> (CelebrationSender, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<CelebrationRequest>();
    let handle = tokio::spawn(async move {
        while let Some(req) = rx.recv().await {
            let message = writer.treat_celebration(&req.name).await;
            tracing::info!(employee = %req.id, %message, "treat announced");
            board.post(message);
        }
    });
    (tx, handle)
}

// ---------------------------------------------------------------------------
// NotificationBoard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub seq: u64,
    pub message: String,
    pub posted_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Slot {
    seq: u64,
    current: Option<Notification>,
}

/// Single transient notification slot. A newer post replaces an older one,
/// and each post clears itself after the display duration unless it has been
/// replaced in the meantime.
#[derive(Debug, Clone)]
pub struct NotificationBoard {
    slot: Arc<Mutex<Slot>>,
    ttl: Duration,
    events: Option<broadcast::Sender<()>>,
}

impl NotificationBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            ttl,
            events: None,
        }
    }

    /// Broadcast on `tx` whenever the slot changes.
    pub fn with_events(mut self, tx: broadcast::Sender<()>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn current(&self) -> Option<Notification> {
        self.lock().current.clone()
    }

    /// Publish `message`. Must be called inside a Tokio runtime, which drives
    /// the expiry timer.
    pub fn post(&self, message: String) -> Notification {
        let now = Utc::now();
        let expires_at = now
            + chrono::Duration::from_std(self.ttl).unwrap_or_else(|_| chrono::Duration::zero());
        let notification = {
            let mut slot = self.lock();
            slot.seq += 1;
            let n = Notification {
                seq: slot.seq,
                message,
                posted_at: now,
                expires_at,
            };
            slot.current = Some(n.clone());
            n
        };
        self.notify();

        let board = self.clone();
        let seq = notification.seq;
        tokio::spawn(async move {
            tokio::time::sleep(board.ttl).await;
            board.clear_if(seq);
        });

        notification
    }

    /// Clear the slot only if it still holds notification `seq`.
    fn clear_if(&self, seq: u64) -> bool {
        let cleared = {
            let mut slot = self.lock();
            match &slot.current {
                Some(n) if n.seq == seq => {
                    slot.current = None;
                    true
                }
                _ => false,
            }
        };
        if cleared {
            self.notify();
        }
        cleared
    }

    fn notify(&self) {
        if let Some(tx) = &self.events {
            let _ = tx.send(());
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use strikes_genai::Offline;

    #[tokio::test(start_paused = true)]
    async fn notification_clears_after_ttl() {
        let board = NotificationBoard::new(Duration::from_secs(10));
        board.post("Niels moet trakteren!".into());
        assert!(board.current().is_some());

        tokio::time::sleep(Duration::from_secs(9)).await;
        assert!(board.current().is_some());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(board.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn newer_notification_survives_older_timer() {
        let board = NotificationBoard::new(Duration::from_secs(10));
        board.post("first".into());
        tokio::time::sleep(Duration::from_secs(5)).await;
        board.post("second".into());

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(board.current().unwrap().message, "second");

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(board.current().is_none());
    }

    #[tokio::test]
    async fn post_broadcasts_change() {
        let (tx, mut rx) = broadcast::channel(4);
        let board = NotificationBoard::new(Duration::from_secs(10)).with_events(tx);
        board.post("hoi".into());
        assert!(rx.recv().await.is_ok());
    }

    #[tokio::test]
    async fn dispatcher_posts_celebration() {
        let board = NotificationBoard::new(Duration::from_secs(60));
        let writer = StrikeWriter::new(Arc::new(Offline), Duration::from_secs(1));
        let (tx, handle) = spawn_dispatcher(writer, board.clone());

        tx.send(CelebrationRequest {
            id: "1".into(),
            name: "Niels".into(),
        })
        .unwrap();
        drop(tx);
        handle.await.unwrap();

        assert_eq!(
            board.current().unwrap().message,
            "Niels moet nu echt gaan trakteren!"
        );
    }
}
