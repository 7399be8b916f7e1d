use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Business limits of the roster. The defaults are the studio's house rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    #[serde(default = "default_max_employees")]
    pub max_employees: usize,
    /// Cap on a name entered through the add-flow. Rename does not enforce it.
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,
    /// Strike count at which an employee owes a treat.
    #[serde(default = "default_max_strikes")]
    pub max_strikes: u32,
}

fn default_max_employees() -> usize {
    15
}

fn default_max_name_len() -> usize {
    15
}

fn default_max_strikes() -> u32 {
    3
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_employees: default_max_employees(),
            max_name_len: default_max_name_len(),
            max_strikes: default_max_strikes(),
        }
    }
}

// ---------------------------------------------------------------------------
// CelebrationConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CelebrationConfig {
    /// How long a treat announcement stays on the board.
    #[serde(default = "default_display_secs")]
    pub display_secs: u64,
}

fn default_display_secs() -> u64 {
    10
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            display_secs: default_display_secs(),
        }
    }
}

// ---------------------------------------------------------------------------
// GenAiConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenAiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_api_key_env() -> String {
    "API_KEY".to_string()
}

pub const FALLBACK_API_KEY_ENV: &str = "GEMINI_API_KEY";

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl GenAiConfig {
    /// Read the API key from `api_key_env`, then from `GEMINI_API_KEY`.
    /// Blank values count as absent.
    pub fn api_key(&self) -> Option<String> {
        [self.api_key_env.as_str(), FALLBACK_API_KEY_ENV]
            .into_iter()
            .filter_map(|var| std::env::var(var).ok())
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub celebration: CelebrationConfig,
    #[serde(default)]
    pub genai: GenAiConfig,
}

impl Config {
    /// Load `.strikes/config.yaml`, falling back to defaults when it is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Config::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.limits.max_employees == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "limits.max_employees is 0: nobody can be added".to_string(),
            });
        }
        if self.limits.max_name_len == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "limits.max_name_len is 0: every name would be empty".to_string(),
            });
        }
        if self.limits.max_strikes == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "limits.max_strikes must be at least 1".to_string(),
            });
        }
        if self.celebration.display_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "celebration.display_secs is 0: announcements vanish immediately"
                    .to_string(),
            });
        }
        if self.genai.timeout_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "genai.timeout_secs is 0: every generation will fall back".to_string(),
            });
        }
        if self.genai.api_key().is_none() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "no API key in ${} or ${}: generated texts use fallbacks",
                    self.genai.api_key_env, FALLBACK_API_KEY_ENV
                ),
            });
        }

        warnings
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
    fn missing_config_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.limits.max_employees, 15);
        assert_eq!(cfg.limits.max_name_len, 15);
        assert_eq!(cfg.limits.max_strikes, 3);
        assert_eq!(cfg.celebration.display_secs, 10);
        assert_eq!(cfg.genai.timeout_secs, 15);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".strikes")).unwrap();
        std::fs::write(
            dir.path().join(".strikes/config.yaml"),
            "limits:\n  max_employees: 20\n",
        )
        .unwrap();

        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.limits.max_employees, 20);
        assert_eq!(cfg.limits.max_name_len, 15);
        assert_eq!(cfg.genai.model, "gemini-3-flash-preview");
    }

    #[test]
    fn config_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.celebration.display_secs = 4;
        cfg.save(dir.path()).unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), cfg);
    }

    #[test]
    fn validate_flags_zero_limits() {
        let mut cfg = Config::default();
        cfg.limits.max_strikes = 0;
        let warnings = cfg.validate();
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Error && w.message.contains("max_strikes")));
    }
}
