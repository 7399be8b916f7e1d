use crate::config::Limits;
use crate::employee::Employee;
use crate::error::{Result, StrikesError};
use crate::paths;
use crate::roster::Roster;
use std::path::{Path, PathBuf};

/// The single durable slot a roster lives in.
///
/// The slot holds a JSON array of employee records and is overwritten in full
/// on every save.
#[derive(Debug, Clone)]
pub struct RosterStore {
    path: PathBuf,
}

impl RosterStore {
    /// Slot under the fixed [`paths::STORAGE_KEY`] inside `root`.
    pub fn open(root: &Path) -> Self {
        Self {
            path: paths::roster_path(root),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored records. `Ok(None)` when nothing has been stored yet.
    pub fn load(&self) -> Result<Option<Vec<Employee>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(&self.path)?;
        let employees =
            serde_json::from_str(&data).map_err(|source| StrikesError::CorruptRoster {
                path: self.path.clone(),
                source,
            })?;
        Ok(Some(employees))
    }

    /// Load the stored roster, or the seed roster when the slot is absent or
    /// unreadable. A corrupt slot is left on disk until the next save.
    pub fn load_or_seed(&self, limits: Limits) -> Result<Roster> {
        match self.load() {
            Ok(Some(employees)) => Ok(Roster::new(employees, limits)),
            Ok(None) => {
                tracing::debug!(path = %self.path.display(), "no stored roster, using seed");
                Ok(Roster::seeded(limits))
            }
            Err(StrikesError::CorruptRoster { path, source }) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %source,
                    "stored roster is corrupt, falling back to seed"
                );
                Ok(Roster::seeded(limits))
            }
            Err(e) => Err(e),
        }
    }

    /// Persist every employee field. An empty roster is never written, so a
    /// blank in-memory state cannot wipe the stored one. Returns whether the
    /// slot was written.
    pub fn save(&self, roster: &Roster) -> Result<bool> {
        if roster.is_empty() {
            tracing::debug!("skipping save of empty roster");
            return Ok(false);
        }
        let data = serde_json::to_string_pretty(roster.employees())?;
        crate::io::atomic_write(&self.path, data.as_bytes())?;
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn absent_slot_loads_none() {
        let dir = TempDir::new().unwrap();
        let store = RosterStore::open(dir.path());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn absent_slot_seeds() {
        let dir = TempDir::new().unwrap();
        let roster = RosterStore::open(dir.path())
            .load_or_seed(Limits::default())
            .unwrap();
        assert_eq!(roster.len(), 13);
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = RosterStore::open(dir.path());

        let mut roster = Roster::seeded(Limits::default());
        roster.add_strike("2", Some("Koffiebeker niet in de vaatwasser"));
        roster.add_strike("2", None);
        roster.rename_employee("3", "Geert-Jan");
        roster.add_employee("Sanne");
        assert!(store.save(&roster).unwrap());

        let loaded = store.load_or_seed(Limits::default()).unwrap();
        assert_eq!(loaded, roster);
    }

    #[test]
    fn persisted_layout_is_plain_array() {
        let dir = TempDir::new().unwrap();
        let store = RosterStore::open(dir.path());
        let mut roster = Roster::new(vec![Employee::new("1", "Niels")], Limits::default());
        roster.add_strike("1", Some("Te luid"));
        store.save(&roster).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(
            raw,
            serde_json::json!([
                { "id": "1", "name": "Niels", "strikes": 1, "reasons": ["Te luid"] }
            ])
        );
    }

    #[test]
    fn empty_roster_is_not_saved() {
        let dir = TempDir::new().unwrap();
        let store = RosterStore::open(dir.path());
        let seeded = Roster::seeded(Limits::default());
        store.save(&seeded).unwrap();
        let before = std::fs::read_to_string(store.path()).unwrap();

        let empty = Roster::new(Vec::new(), Limits::default());
        assert!(!store.save(&empty).unwrap());
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn empty_roster_does_not_create_slot() {
        let dir = TempDir::new().unwrap();
        let store = RosterStore::open(dir.path());
        store
            .save(&Roster::new(Vec::new(), Limits::default()))
            .unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn corrupt_slot_is_reported_by_load() {
        let dir = TempDir::new().unwrap();
        let store = RosterStore::open(dir.path());
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(
            store.load(),
            Err(StrikesError::CorruptRoster { .. })
        ));
    }

    #[test]
    fn corrupt_slot_falls_back_to_seed() {
        let dir = TempDir::new().unwrap();
        let store = RosterStore::open(dir.path());
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "[{\"id\": 1}]").unwrap();

        let roster = store.load_or_seed(Limits::default()).unwrap();
        assert_eq!(roster.len(), 13);
        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            "[{\"id\": 1}]"
        );
    }
}
