//! Fixed server configuration.
//!
//! There is no environment or file override; every value is a constant
//! resolved against the working directory at startup.

use medstore_core::default_log_level;
use medstore_core::protocol::SERVER_PORT;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

const DB_FILE_NAME: &str = "medstore.sqlite3";
const LOG_DIR: [&str; 2] = ["logs", "server"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listens on every interface.
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    /// Absolute; required by `init_logging`.
    pub log_dir: PathBuf,
    pub log_level: &'static str,
}

impl ServerConfig {
    /// Builds the default configuration rooted at the current directory.
    pub fn from_defaults() -> std::io::Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), SERVER_PORT),
            db_path: cwd.join(DB_FILE_NAME),
            log_dir: LOG_DIR.iter().fold(cwd, |dir, part| dir.join(part)),
            log_level: default_log_level(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ServerConfig;

    #[test]
    fn defaults_listen_on_fixed_port_with_absolute_paths() {
        let config = ServerConfig::from_defaults().unwrap();

        assert_eq!(config.bind_addr.port(), 9040);
        assert!(config.bind_addr.ip().is_unspecified());
        assert!(config.db_path.ends_with("medstore.sqlite3"));
        assert!(config.log_dir.is_absolute());
        assert!(config.log_dir.ends_with("logs/server"));
    }
}
