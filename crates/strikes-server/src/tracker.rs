use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use strikes_core::config::{Config, GenAiConfig};
use strikes_core::confirm::Confirm;
use strikes_core::roster::{Roster, StrikeRecorded};
use strikes_core::store::RosterStore;
use strikes_core::Result;
use strikes_genai::{GeminiClient, GeminiConfig, Offline, StrikeWriter, TextGenerator};

use crate::notify::{CelebrationRequest, CelebrationSender};

/// Owns the roster and its slot. Every mutation that changes something is
/// written through to the slot before the call returns.
#[derive(Debug)]
pub struct Tracker {
    roster: Roster,
    store: RosterStore,
    celebrations: Option<CelebrationSender>,
}

impl Tracker {
    pub fn new(roster: Roster, store: RosterStore) -> Self {
        Self {
            roster,
            store,
            celebrations: None,
        }
    }

    /// Load the roster stored under `root`, or the seed roster.
    pub fn open(root: &Path, config: &Config) -> Result<Self> {
        let store = RosterStore::open(root);
        let roster = store.load_or_seed(config.limits)?;
        tracing::debug!(employees = roster.len(), "roster loaded");
        Ok(Self::new(roster, store))
    }

    /// Route celebration requests to `tx` once a strike reaches the threshold.
    pub fn with_celebrations(mut self, tx: CelebrationSender) -> Self {
        self.celebrations = Some(tx);
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Write the current roster to the slot (skipped when empty).
    pub fn persist(&self) -> Result<()> {
        self.store.save(&self.roster)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    pub fn add_strike(&mut self, id: &str, reason: Option<&str>) -> Result<Option<StrikeRecorded>> {
        let Some(recorded) = self.roster.add_strike(id, reason) else {
            return Ok(None);
        };
        if !recorded.is_recorded() {
            return Ok(Some(recorded));
        }
        self.persist()?;
        if recorded.triggers_celebration() {
            self.celebrate(&recorded);
        }
        Ok(Some(recorded))
    }

    pub fn reset_strikes(&mut self, id: &str) -> Result<bool> {
        let changed = self.roster.reset_strikes(id);
        self.persist_if(changed)
    }

    pub fn reset_all(&mut self, confirm: &dyn Confirm) -> Result<bool> {
        let changed = self.roster.reset_all(confirm);
        self.persist_if(changed)
    }

    pub fn rename_employee(&mut self, id: &str, name: &str) -> Result<bool> {
        let changed = self.roster.rename_employee(id, name);
        self.persist_if(changed)
    }

    pub fn remove_employee(&mut self, id: &str, confirm: &dyn Confirm) -> Result<bool> {
        let changed = self.roster.remove_employee(id, confirm);
        self.persist_if(changed)
    }

    pub fn add_employee(&mut self, name: &str) -> Result<Option<String>> {
        let id = self.roster.add_employee(name);
        self.persist_if(id.is_some())?;
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn persist_if(&self, changed: bool) -> Result<bool> {
        if changed {
            self.persist()?;
        }
        Ok(changed)
    }

    fn celebrate(&self, recorded: &StrikeRecorded) {
        let Some(tx) = &self.celebrations else {
            tracing::debug!(employee = %recorded.id, "no celebration dispatcher attached");
            return;
        };
        let request = CelebrationRequest {
            id: recorded.id.clone(),
            name: recorded.name.clone(),
        };
        if tx.send(request).is_err() {
            tracing::warn!(employee = %recorded.id, "celebration dispatcher has stopped");
        }
    }
}

/// Lock the shared tracker, recovering from poisoning. Roster transitions
/// check their arithmetic before they mutate, so a guard dropped by a panic
/// leaves the roster as the last completed transition left it.
pub fn lock(tracker: &Mutex<Tracker>) -> MutexGuard<'_, Tracker> {
    tracker.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Generate a strike reason for employee `id` without mutating anything.
/// The lock is released before the generator is awaited. `None` when the
/// employee does not exist.
pub async fn generate_magic_reason(
    tracker: &Mutex<Tracker>,
    writer: &StrikeWriter,
    id: &str,
) -> Option<String> {
    let name = {
        let guard = lock(tracker);
        guard.roster().get(id)?.name.clone()
    };
    Some(writer.strike_reason(&name).await)
}

/// Build the writer described by the `genai` config section. Without an API
/// key every call resolves to its fallback.
pub fn writer_for(config: &GenAiConfig) -> StrikeWriter {
    let generator: Arc<dyn TextGenerator> = match config.api_key() {
        Some(api_key) => Arc::new(GeminiClient::new(GeminiConfig {
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            ..GeminiConfig::new(api_key)
        })),
        None => {
            tracing::info!("no API key configured, generated texts use fallbacks");
            Arc::new(Offline)
        }
    };
    StrikeWriter::new(generator, Duration::from_secs(config.timeout_secs))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use strikes_core::config::Limits;
    use strikes_core::employee::Employee;
    use strikes_genai::{GenAiError, Purpose};
    use tempfile::TempDir;
    use tokio::sync::mpsc;

    fn open(dir: &TempDir) -> Tracker {
        Tracker::open(dir.path(), &Config::default()).unwrap()
    }

    fn reload(dir: &TempDir) -> Roster {
        RosterStore::open(dir.path())
            .load_or_seed(Limits::default())
            .unwrap()
    }

    #[test]
    fn mutations_are_written_through() {
        let dir = TempDir::new().unwrap();
        let mut tracker = open(&dir);
        tracker.add_strike("1", Some("Te laat")).unwrap();
        tracker.rename_employee("2", "Piet").unwrap();
        let id = tracker.add_employee("Sanne").unwrap().unwrap();

        let stored = reload(&dir);
        assert_eq!(&stored, tracker.roster());
        assert_eq!(stored.get("1").unwrap().reasons, vec!["Te laat"]);
        assert_eq!(stored.get("2").unwrap().name, "Piet");
        assert!(stored.get(&id).is_some());
    }

    #[test]
    fn noop_does_not_create_slot() {
        let dir = TempDir::new().unwrap();
        let mut tracker = open(&dir);
        assert!(!tracker.reset_all(&false).unwrap());
        assert!(!tracker.remove_employee("1", &false).unwrap());
        assert!(tracker.add_employee("   ").unwrap().is_none());
        assert!(!RosterStore::open(dir.path()).path().exists());
    }

    #[test]
    fn third_strike_sends_one_celebration() {
        let dir = TempDir::new().unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tracker = open(&dir).with_celebrations(tx);

        tracker.add_strike("1", Some("Laptop niet opgeladen")).unwrap();
        tracker.add_strike("1", Some("Laptop niet opgeladen")).unwrap();
        assert!(rx.try_recv().is_err());

        tracker.add_strike("1", None).unwrap();
        let req = rx.try_recv().unwrap();
        assert_eq!(req.name, "Niels");
        assert_eq!(req.id, "1");
        assert!(rx.try_recv().is_err());

        let niels = tracker.roster().get("1").unwrap();
        assert_eq!(niels.strikes, 3);
        assert_eq!(
            niels.reasons,
            vec![
                "Laptop niet opgeladen",
                "Laptop niet opgeladen",
                "Geen reden opgegeven."
            ]
        );
    }

    #[test]
    fn strike_on_other_counts_sends_nothing() {
        let dir = TempDir::new().unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tracker = open(&dir).with_celebrations(tx);
        for _ in 0..5 {
            tracker.add_strike("2", None).unwrap();
        }
        assert_eq!(rx.try_recv().unwrap().name, "Pieter");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn failed_save_sends_no_celebration() {
        let dir = TempDir::new().unwrap();
        let store = RosterStore::open(dir.path());
        // A directory at the slot path makes every save fail.
        std::fs::create_dir_all(store.path()).unwrap();

        let mut niels = Employee::new("1", "Niels");
        niels.strikes = 2;
        niels.reasons = vec!["a".into(), "b".into()];
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tracker =
            Tracker::new(Roster::new(vec![niels], Limits::default()), store).with_celebrations(tx);

        assert!(tracker.add_strike("1", None).is_err());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn strike_at_count_ceiling_is_not_saved() {
        let dir = TempDir::new().unwrap();
        let mut maxed = Employee::new("1", "Niels");
        maxed.strikes = u32::MAX;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tracker = Tracker::new(
            Roster::new(vec![maxed], Limits::default()),
            RosterStore::open(dir.path()),
        )
        .with_celebrations(tx);

        let recorded = tracker.add_strike("1", Some("x")).unwrap().unwrap();
        assert!(!recorded.is_recorded());
        assert!(tracker.roster().get("1").unwrap().reasons.is_empty());
        assert!(!RosterStore::open(dir.path()).path().exists());
        assert!(rx.try_recv().is_err());
    }

    struct Throws;

    #[async_trait]
    impl TextGenerator for Throws {
        async fn generate(&self, _: Purpose, _: &str) -> strikes_genai::Result<String> {
            Err(GenAiError::Status {
                status: 503,
                body: "unavailable".into(),
            })
        }
    }

    #[tokio::test]
    async fn magic_reason_falls_back_and_leaves_roster_alone() {
        let dir = TempDir::new().unwrap();
        let tracker = Mutex::new(open(&dir));
        let before = lock(&tracker).roster().clone();
        let writer = StrikeWriter::new(Arc::new(Throws), Duration::from_secs(1));

        let reason = generate_magic_reason(&tracker, &writer, "1").await;
        assert_eq!(reason.as_deref(), Some("Onbekende overtreding."));
        assert_eq!(lock(&tracker).roster(), &before);
    }

    #[tokio::test]
    async fn magic_reason_for_unknown_employee_is_none() {
        let dir = TempDir::new().unwrap();
        let tracker = Mutex::new(open(&dir));
        let writer = StrikeWriter::new(Arc::new(Offline), Duration::from_secs(1));
        assert!(generate_magic_reason(&tracker, &writer, "404")
            .await
            .is_none());
    }
}
