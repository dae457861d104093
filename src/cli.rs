//! Command line interface
//!
//! Follows the classic development server: an optional positional port and
//! `--bind`. Which directory is served depends on the binary, not on a flag.

use clap::Parser;
use std::path::PathBuf;

use crate::config::ConfigOverrides;

#[derive(Debug, Parser)]
#[command(version, about = "Serve static files over HTTP for local development")]
pub struct Cli {
    /// Port to listen on [default: 8000]
    pub port: Option<u16>,

    /// Address to bind to [default: 0.0.0.0]
    #[arg(short, long, value_name = "ADDRESS")]
    pub bind: Option<String>,

    /// TOML configuration file [default: ./devserve.toml if present]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Values that take precedence over the config file and environment
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.bind.clone(),
            port: self.port,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["devserve"]).unwrap();
        assert_eq!(cli.overrides(), ConfigOverrides::default());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_port_and_bind() {
        let cli = Cli::try_parse_from(["devserve", "9000", "--bind", "127.0.0.1"]).unwrap();
        assert_eq!(
            cli.overrides(),
            ConfigOverrides {
                host: Some("127.0.0.1".to_string()),
                port: Some(9000),
            }
        );

        let cli = Cli::try_parse_from(["devserve", "-b", "::1", "-c", "dev.toml"]).unwrap();
        assert_eq!(cli.bind.as_deref(), Some("::1"));
        assert_eq!(cli.config, Some(PathBuf::from("dev.toml")));
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Cli::try_parse_from(["devserve", "70000"]).is_err());
        assert!(Cli::try_parse_from(["devserve", "http"]).is_err());
    }

    #[test]
    fn test_no_directory_flag() {
        assert!(Cli::try_parse_from(["devserve", "--directory", "/tmp"]).is_err());
    }
}
