//! Bazaar
//!
//! Interactive demo marketplace on stdin/stdout.
//!
//! Use `-f` to load seed data from a YAML file instead of the bundled store.

use std::io;

use anyhow::Result;
use tracing::info;

use bazaar::{cli::Shell, config::Config, fixtures::Fixture, observability};

/// Bazaar entry point
pub fn main() -> Result<()> {
    let config = Config::load().unwrap_or_else(|err| err.exit());

    observability::init(&config.logging)?;

    let fixture = match config.fixture.as_deref() {
        Some(path) => Fixture::from_path(path)?,
        None => Fixture::embedded()?,
    };

    let app = fixture.into_app()?;

    info!(products = app.catalog().len(), "marketplace ready");

    let mut shell = Shell::new(app, io::stdin().lock(), io::stdout().lock());
    shell.run()?;

    Ok(())
}
