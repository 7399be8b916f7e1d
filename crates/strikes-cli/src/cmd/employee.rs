use crate::output::{print_json, print_table, strike_dots};
use crate::prompt::StdinConfirm;
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use strikes_core::StrikesError;

#[derive(Subcommand)]
pub enum EmployeeSubcommand {
    /// Add an employee (name is trimmed and capped)
    Add {
        /// Display name
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Rename an employee
    Rename {
        id: String,
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Remove an employee and their strikes
    Remove {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// List employees
    List,
    /// Show one employee with every strike reason
    Show { id: String },
}

pub fn run(root: &Path, subcmd: EmployeeSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        EmployeeSubcommand::Add { name } => add(root, &name.join(" "), json),
        EmployeeSubcommand::Rename { id, name } => rename(root, &id, &name.join(" "), json),
        EmployeeSubcommand::Remove { id, yes } => remove(root, &id, yes, json),
        EmployeeSubcommand::List => list(root, json),
        EmployeeSubcommand::Show { id } => show(root, &id, json),
    }
}

fn add(root: &Path, name: &str, json: bool) -> anyhow::Result<()> {
    let (_config, mut tracker) = super::open(root)?;
    let id = tracker
        .add_employee(name)
        .context("failed to save roster")?;

    let Some(id) = id else {
        if tracker.roster().is_full() {
            anyhow::bail!(
                "roster is full ({} employees)",
                tracker.roster().limits().max_employees
            );
        }
        anyhow::bail!("name cannot be empty");
    };

    let added = tracker.roster().get(&id).map(|e| e.name.clone()).unwrap_or_default();
    if json {
        print_json(&serde_json::json!({ "added": true, "id": id, "name": added }))?;
    } else {
        println!("Added {added} [{id}]");
    }
    Ok(())
}

fn rename(root: &Path, id: &str, name: &str, json: bool) -> anyhow::Result<()> {
    let (_config, mut tracker) = super::open(root)?;
    if !tracker
        .rename_employee(id, name)
        .context("failed to save roster")?
    {
        return Err(StrikesError::EmployeeNotFound(id.to_string()).into());
    }

    if json {
        print_json(&serde_json::json!({ "renamed": true, "id": id, "name": name }))?;
    } else {
        println!("Renamed [{id}] to {name}");
    }
    Ok(())
}

fn remove(root: &Path, id: &str, yes: bool, json: bool) -> anyhow::Result<()> {
    let (_config, mut tracker) = super::open(root)?;
    let name = tracker
        .roster()
        .get(id)
        .map(|e| e.name.clone())
        .ok_or_else(|| StrikesError::EmployeeNotFound(id.to_string()))?;

    let removed = tracker
        .remove_employee(id, &StdinConfirm { assume_yes: yes })
        .context("failed to save roster")?;

    if json {
        print_json(&serde_json::json!({ "removed": removed, "id": id }))?;
    } else if removed {
        println!("Removed {name} [{id}]");
    } else {
        println!("Nothing removed.");
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let (_config, tracker) = super::open(root)?;
    let roster = tracker.roster();

    if json {
        print_json(&roster.employees())?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = roster
        .employees()
        .iter()
        .map(|e| vec![e.id.clone(), e.name.clone(), e.strikes.to_string()])
        .collect();
    print_table(&["ID", "NAME", "STRIKES"], rows);
    Ok(())
}

fn show(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let (_config, tracker) = super::open(root)?;
    let employee = tracker
        .roster()
        .get(id)
        .ok_or_else(|| StrikesError::EmployeeNotFound(id.to_string()))?;
    let max_strikes = tracker.roster().limits().max_strikes;

    if json {
        print_json(employee)?;
        return Ok(());
    }

    println!("{} [{}]", employee.name, employee.id);
    println!(
        "Strikes: {} ({}/{})",
        strike_dots(employee.strikes, max_strikes),
        employee.strikes,
        max_strikes
    );
    if employee.is_treating(max_strikes) {
        println!("Status:  TRAKTEREN!");
    }
    if !employee.reasons.is_empty() {
        println!();
        for (i, reason) in employee.reasons.iter().enumerate() {
            println!("  {}. {reason}", i + 1);
        }
    }
    Ok(())
}
