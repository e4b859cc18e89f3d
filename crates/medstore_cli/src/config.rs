//! Fixed client configuration.

use medstore_core::protocol::SERVER_PORT;
use std::path::PathBuf;
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const LOG_DIR: [&str; 2] = ["logs", "client"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme, host and port; endpoint paths are appended verbatim.
    pub base_url: String,
    /// Applies to fetch only; writes wait indefinitely.
    pub fetch_timeout: Duration,
    pub log_dir: PathBuf,
}

impl ClientConfig {
    /// Builds the default configuration rooted at the current directory.
    pub fn from_defaults() -> std::io::Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self {
            base_url: format!("http://127.0.0.1:{SERVER_PORT}"),
            fetch_timeout: FETCH_TIMEOUT,
            log_dir: LOG_DIR.iter().fold(cwd, |dir, part| dir.join(part)),
        })
    }
}
