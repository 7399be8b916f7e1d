use serde::{Deserialize, Serialize};

/// Reason stored when a strike is recorded without one.
pub const DEFAULT_REASON: &str = "Geen reden opgegeven.";

/// One tracked employee. The persisted shape is exactly these four fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub strikes: u32,
    /// One entry per strike, oldest first.
    #[serde(default)]
    pub reasons: Vec<String>,
}

impl Employee {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            strikes: 0,
            reasons: Vec::new(),
        }
    }

    /// Whether this employee has reached `max_strikes` and owes a treat.
    pub fn is_treating(&self, max_strikes: u32) -> bool {
        self.strikes >= max_strikes
    }

    /// Append a strike. Returns false, changing nothing, when the count is
    /// already at its ceiling.
    pub(crate) fn record_strike(&mut self, reason: String) -> bool {
        let Some(strikes) = self.strikes.checked_add(1) else {
            return false;
        };
        self.reasons.push(reason);
        self.strikes = strikes;
        true
    }

    pub(crate) fn clear_strikes(&mut self) {
        self.strikes = 0;
        self.reasons.clear();
    }
}

/// Resolve the reason for a new strike: trimmed input, or [`DEFAULT_REASON`]
/// when it is absent or blank.
pub fn normalize_reason(reason: Option<&str>) -> String {
    match reason.map(str::trim) {
        Some(r) if !r.is_empty() => r.to_string(),
        _ => DEFAULT_REASON.to_string(),
    }
}

/// The fixed default roster used when nothing has been persisted yet.
pub fn seed_roster() -> Vec<Employee> {
    [
        "Niels", "Pieter", "Geert", "Michiel", "Skip", "Sherin", "Jari", "Jurre", "Lars", "Pim",
        "Chantal", "Cas", "Mick",
    ]
    .iter()
    .enumerate()
    .map(|(i, name)| Employee::new((i + 1).to_string(), *name))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_reasons_fall_back() {
        assert_eq!(normalize_reason(None), DEFAULT_REASON);
        assert_eq!(normalize_reason(Some("")), DEFAULT_REASON);
        assert_eq!(normalize_reason(Some("   \t")), DEFAULT_REASON);
        assert_eq!(normalize_reason(Some("  Te laat  ")), "Te laat");
    }

    #[test]
    fn seed_has_thirteen_clean_employees() {
        let seed = seed_roster();
        assert_eq!(seed.len(), 13);
        assert_eq!(seed[0].id, "1");
        assert_eq!(seed[0].name, "Niels");
        assert_eq!(seed[12].id, "13");
        assert_eq!(seed[12].name, "Mick");
        assert!(seed.iter().all(|e| e.strikes == 0 && e.reasons.is_empty()));
    }

    #[test]
    fn missing_reasons_deserialize_empty() {
        let e: Employee = serde_json::from_str(r#"{"id":"1","name":"Niels","strikes":0}"#).unwrap();
        assert!(e.reasons.is_empty());
    }
}
