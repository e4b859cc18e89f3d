//! Interactive client entry point.
//!
//! # Responsibility
//! - Run the numbered menu on stdin/stdout against the HTTP API.

use medstore_core::{default_log_level, init_logging, Menu};
use medstore_cli::{ApiClient, ClientConfig};
use std::io;

fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_defaults()?;
    init_logging(default_log_level(), &config.log_dir).map_err(anyhow::Error::msg)?;

    let client = ApiClient::new(&config)?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    Menu::new(client)
        .require_positive_delete_id(true)
        .run(&mut input, &mut output)?;
    Ok(())
}
