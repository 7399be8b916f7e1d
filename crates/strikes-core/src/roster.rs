use crate::config::Limits;
use crate::confirm::{Confirm, REMOVE_PROMPT, RESET_ALL_PROMPT};
use crate::employee::{normalize_reason, seed_roster, Employee};
use chrono::Utc;
use serde::Serialize;

// ---------------------------------------------------------------------------
// StrikeRecorded
// ---------------------------------------------------------------------------

/// Outcome of a committed strike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrikeRecorded {
    pub id: String,
    pub name: String,
    pub previous_strikes: u32,
    pub strikes: u32,
    #[serde(skip)]
    max_strikes: u32,
}

impl StrikeRecorded {
    /// False when the count was already at its ceiling and nothing changed.
    pub fn is_recorded(&self) -> bool {
        self.strikes != self.previous_strikes
    }

    /// True exactly when this strike moved the employee onto the treat threshold.
    pub fn triggers_celebration(&self) -> bool {
        self.is_recorded() && self.previous_strikes.checked_add(1) == Some(self.max_strikes)
    }
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// Ordered, id-unique collection of employees and every transition on it.
///
/// All operations are silent no-ops when their preconditions fail (unknown
/// id, blank name, full roster, declined confirmation); the return value says
/// whether anything changed. The strike cap is not enforced here: callers
/// gate further strikes once [`Employee::is_treating`] holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    employees: Vec<Employee>,
    limits: Limits,
}

impl Roster {
    pub fn new(employees: Vec<Employee>, limits: Limits) -> Self {
        Self { employees, limits }
    }

    pub fn seeded(limits: Limits) -> Self {
        Self::new(seed_roster(), limits)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.employees.len() >= self.limits.max_employees
    }

    /// Employees who currently owe a treat, in roster order.
    pub fn treating(&self) -> impl Iterator<Item = &Employee> {
        let max = self.limits.max_strikes;
        self.employees.iter().filter(move |e| e.is_treating(max))
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    pub fn add_strike(&mut self, id: &str, reason: Option<&str>) -> Option<StrikeRecorded> {
        let max_strikes = self.limits.max_strikes;
        let employee = self.find_mut(id)?;
        let previous_strikes = employee.strikes;
        if !employee.record_strike(normalize_reason(reason)) {
            tracing::warn!(
                employee = %employee.id,
                strikes = previous_strikes,
                "strike count at ceiling, strike ignored"
            );
        }
        Some(StrikeRecorded {
            id: employee.id.clone(),
            name: employee.name.clone(),
            previous_strikes,
            strikes: employee.strikes,
            max_strikes,
        })
    }

    pub fn reset_strikes(&mut self, id: &str) -> bool {
        match self.find_mut(id) {
            Some(e) => {
                e.clear_strikes();
                true
            }
            None => false,
        }
    }

    pub fn reset_all(&mut self, confirm: &dyn Confirm) -> bool {
        if !confirm.confirm(RESET_ALL_PROMPT) {
            return false;
        }
        self.employees.iter_mut().for_each(Employee::clear_strikes);
        true
    }

    pub fn rename_employee(&mut self, id: &str, name: impl Into<String>) -> bool {
        match self.find_mut(id) {
            Some(e) => {
                e.name = name.into();
                true
            }
            None => false,
        }
    }

    pub fn remove_employee(&mut self, id: &str, confirm: &dyn Confirm) -> bool {
        if self.get(id).is_none() || !confirm.confirm(REMOVE_PROMPT) {
            return false;
        }
        self.employees.retain(|e| e.id != id);
        true
    }

    /// Append a new employee and return its id. The name is trimmed and cut
    /// to `max_name_len` characters.
    pub fn add_employee(&mut self, name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() || self.is_full() {
            return None;
        }
        let name: String = name.chars().take(self.limits.max_name_len).collect();
        let id = self.fresh_id();
        self.employees.push(Employee::new(id.clone(), name));
        Some(id)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn find_mut(&mut self, id: &str) -> Option<&mut Employee> {
        self.employees.iter_mut().find(|e| e.id == id)
    }

    /// Millisecond timestamp, bumped past any id already in use.
    fn fresh_id(&self) -> String {
        let mut stamp = Utc::now().timestamp_millis();
        loop {
            let id = stamp.to_string();
            if self.get(&id).is_none() {
                return id;
            }
            stamp += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
