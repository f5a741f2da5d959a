//! Server configuration from the command line and environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Runtime configuration for the rentledger server.
///
/// Everything lives under one data directory so backing up the whole
/// application is a single copy.
#[derive(Debug, Clone, Parser)]
#[command(name = "rentledger", version, about = "Rental record-keeping server")]
pub struct ServerConfig {
    /// Address to bind the HTTP server to.
    #[arg(long, env = "RENTLEDGER_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Directory holding the JSON document and uploaded files.
    #[arg(long, env = "RENTLEDGER_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,
}

impl ServerConfig {
    /// Path of the persisted JSON document.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("database.json")
    }

    /// Root directory for uploaded attachment files.
    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_bind_locally_under_data() {
        let config = ServerConfig::parse_from(["rentledger"]);
        assert_eq!(config.bind.to_string(), "127.0.0.1:8080");
        assert_eq!(config.database_path(), PathBuf::from("data/database.json"));
        assert_eq!(config.uploads_dir(), PathBuf::from("data/uploads"));
    }

    #[rstest]
    fn flags_override_the_defaults() {
        let config = ServerConfig::parse_from([
            "rentledger",
            "--bind",
            "0.0.0.0:9000",
            "--data-dir",
            "/var/lib/rentledger",
        ]);
        assert_eq!(config.bind.to_string(), "0.0.0.0:9000");
        assert_eq!(
            config.database_path(),
            PathBuf::from("/var/lib/rentledger/database.json")
        );
    }
}
