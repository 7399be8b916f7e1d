use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const STRIKES_DIR: &str = ".strikes";
pub const CONFIG_FILE: &str = ".strikes/config.yaml";

/// Fixed key of the single persisted roster slot.
pub const STORAGE_KEY: &str = "smash_studios_strikes_v4";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn strikes_dir(root: &Path) -> PathBuf {
    root.join(STRIKES_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// File backing the roster slot.
pub fn roster_path(root: &Path) -> PathBuf {
    strikes_dir(root).join(format!("{STORAGE_KEY}.json"))
}
