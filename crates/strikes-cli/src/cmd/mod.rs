pub mod board;
pub mod config;
pub mod employee;
pub mod init;
pub mod strike;
pub mod ui;

use anyhow::Context;
use std::path::Path;
use strikes_core::config::Config;
use strikes_server::Tracker;

/// Load config and tracker for a synchronous command.
pub(crate) fn open(root: &Path) -> anyhow::Result<(Config, Tracker)> {
    let config = Config::load(root).context("failed to load config")?;
    let tracker = Tracker::open(root, &config).context("failed to load roster")?;
    Ok((config, tracker))
}
