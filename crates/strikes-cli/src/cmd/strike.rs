use crate::output::{print_json, strike_dots};
use crate::prompt::StdinConfirm;
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use strikes_core::StrikesError;
use strikes_server::notify::{self, NotificationBoard};
use strikes_server::tracker;

#[derive(Subcommand)]
pub enum StrikeSubcommand {
    /// Give an employee a strike
    Add {
        id: String,
        /// Reason (default: "Geen reden opgegeven.")
        #[arg(num_args = 0..)]
        reason: Vec<String>,
        /// Let the text generator come up with the reason
        #[arg(long, conflicts_with = "reason")]
        magic: bool,
        /// Record the strike even if the employee already owes a treat
        #[arg(long)]
        force: bool,
    },
    /// Clear one employee's strikes
    Reset { id: String },
    /// Clear everyone's strikes
    ResetAll {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Print a generated strike reason without recording anything
    Magic { id: String },
}

pub fn run(root: &Path, subcmd: StrikeSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        StrikeSubcommand::Add {
            id,
            reason,
            magic,
            force,
        } => add(root, &id, &reason.join(" "), magic, force, json),
        StrikeSubcommand::Reset { id } => reset(root, &id, json),
        StrikeSubcommand::ResetAll { yes } => reset_all(root, yes, json),
        StrikeSubcommand::Magic { id } => magic(root, &id, json),
    }
}

fn add(
    root: &Path,
    id: &str,
    reason: &str,
    magic: bool,
    force: bool,
    json: bool,
) -> anyhow::Result<()> {
    let (config, tracker) = super::open(root)?;
    let max_strikes = tracker.roster().limits().max_strikes;
    let employee = tracker
        .roster()
        .get(id)
        .ok_or_else(|| StrikesError::EmployeeNotFound(id.to_string()))?;
    if employee.is_treating(max_strikes) && !force {
        anyhow::bail!(
            "{} already has {} strikes and owes a treat (use --force to add more)",
            employee.name,
            employee.strikes
        );
    }

    let writer = tracker::writer_for(&config.genai);
    let board = NotificationBoard::new(Duration::from_secs(config.celebration.display_secs));
    let rt = tokio::runtime::Runtime::new()?;

    let recorded = rt.block_on(async {
        let (celebrations, dispatcher) = notify::spawn_dispatcher(writer.clone(), board.clone());
        let shared = Mutex::new(tracker.with_celebrations(celebrations));

        let reason = if magic {
            tracker::generate_magic_reason(&shared, &writer, id).await
        } else {
            Some(reason.to_string())
        };

        let recorded = tracker::lock(&shared)
            .add_strike(id, reason.as_deref())
            .context("failed to save roster")?
            .ok_or_else(|| StrikesError::EmployeeNotFound(id.to_string()))?;
        let employee = tracker::lock(&shared).roster().get(id).cloned();

        // Dropping the tracker closes the channel, so the dispatcher ends
        // after handling the celebration this strike may have queued.
        drop(shared);
        if let Err(e) = dispatcher.await {
            tracing::warn!(error = %e, "celebration dispatcher failed");
        }
        anyhow::Ok((recorded, employee))
    })?;

    let (recorded, employee) = recorded;
    let celebration = board.current().map(|n| n.message);

    if json {
        print_json(&serde_json::json!({
            "employee": employee,
            "previous_strikes": recorded.previous_strikes,
            "celebrating": recorded.triggers_celebration(),
            "celebration": celebration,
        }))?;
        return Ok(());
    }

    let reason = employee
        .as_ref()
        .and_then(|e| e.reasons.last().cloned())
        .unwrap_or_default();
    println!(
        "Strike for {} {} ({}/{}): {reason}",
        recorded.name,
        strike_dots(recorded.strikes, max_strikes),
        recorded.strikes,
        max_strikes
    );
    if let Some(message) = celebration {
        println!();
        println!("🎉 {message} 🎉");
    }
    Ok(())
}

fn reset(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let (_config, mut tracker) = super::open(root)?;
    if !tracker
        .reset_strikes(id)
        .context("failed to save roster")?
    {
        return Err(StrikesError::EmployeeNotFound(id.to_string()).into());
    }

    if json {
        print_json(&serde_json::json!({ "reset": true, "id": id }))?;
    } else {
        println!("Strikes cleared for [{id}]");
    }
    Ok(())
}

fn reset_all(root: &Path, yes: bool, json: bool) -> anyhow::Result<()> {
    let (_config, mut tracker) = super::open(root)?;
    let reset = tracker
        .reset_all(&StdinConfirm { assume_yes: yes })
        .context("failed to save roster")?;

    if json {
        print_json(&serde_json::json!({ "reset": reset }))?;
    } else if reset {
        println!("All strikes cleared.");
    } else {
        println!("Nothing reset.");
    }
    Ok(())
}

fn magic(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let (config, tracker) = super::open(root)?;
    let writer = tracker::writer_for(&config.genai);
    let shared = Mutex::new(tracker);

    let rt = tokio::runtime::Runtime::new()?;
    let reason = rt
        .block_on(tracker::generate_magic_reason(&shared, &writer, id))
        .ok_or_else(|| StrikesError::EmployeeNotFound(id.to_string()))?;

    if json {
        print_json(&serde_json::json!({ "reason": reason }))?;
    } else {
        println!("{reason}");
    }
    Ok(())
}
