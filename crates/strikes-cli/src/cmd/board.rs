use crate::output::{print_json, print_table, strike_dots};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let (_config, tracker) = super::open(root)?;
    let roster = tracker.roster();
    let limits = roster.limits();

    if json {
        print_json(&roster.employees())?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = roster
        .employees()
        .iter()
        .map(|e| {
            vec![
                e.id.clone(),
                e.name.clone(),
                strike_dots(e.strikes, limits.max_strikes),
                if e.is_treating(limits.max_strikes) {
                    "TRAKTEREN!".to_string()
                } else {
                    String::new()
                },
                e.reasons.last().cloned().unwrap_or_default(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "STRIKES", "STATUS", "LAST REASON"], rows);

    println!();
    println!("{}/{} employees", roster.len(), limits.max_employees);
    let treating: Vec<&str> = roster.treating().map(|e| e.name.as_str()).collect();
    if !treating.is_empty() {
        println!("Moet trakteren: {}", treating.join(", "));
    }
    Ok(())
}
