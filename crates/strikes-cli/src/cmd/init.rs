use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use strikes_core::{config::Config, io, paths, store::RosterStore};

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    io::ensure_dir(&paths::strikes_dir(root)).context("failed to create .strikes/")?;

    let wrote_config = !paths::config_path(root).exists();
    if wrote_config {
        Config::default()
            .save(root)
            .context("failed to write config")?;
    }

    let config = Config::load(root).context("failed to load config")?;
    let store = RosterStore::open(root);
    let seeded = match store.load() {
        Ok(Some(_)) => false,
        Ok(None) => store.save(&store.load_or_seed(config.limits)?)?,
        Err(e) => return Err(e).context("existing roster is unreadable; fix or delete it"),
    };

    if json {
        print_json(&serde_json::json!({
            "root": root,
            "config_written": wrote_config,
            "roster_seeded": seeded,
        }))?;
    } else {
        println!("Initialized strike tracker in {}", paths::strikes_dir(root).display());
        if seeded {
            println!("Seeded roster with the default team.");
        }
    }
    Ok(())
}
