use std::io;

use anyhow::{Context, Result};
use log::info;
use patient_records_cli::{run, select_storage, Console};
use patient_records_core::{open_records, StoreConfig};

fn main() -> Result<()> {
    // Diagnostics go to stderr; prompts own stdout.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    let kind = select_storage(&mut console).context("Failed to read storage type")?;
    let config = StoreConfig::new(".", kind);
    info!("Using {} storage at {:?}", config.kind, config.file_path());

    let records = open_records(&config);
    run(&records, &mut console).context("Console session failed")?;

    Ok(())
}
