use clap::Parser;
use std::path::PathBuf;

/// Mock API Server - serves randomly generated JSON from declarative route schemas
#[derive(Parser, Debug, Clone)]
#[command(name = "mockapi", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "MOCKAPI_CONFIG", default_value = "mockapi.toml")]
    pub config: PathBuf,

    /// Server host address
    #[arg(long, env = "MOCKAPI_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "MOCKAPI_PORT")]
    pub port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["mockapi"]);
        assert_eq!(cli.config, PathBuf::from("mockapi.toml"));
        assert!(cli.host.is_none());
        assert!(cli.port.is_none());
    }

    #[test]
    fn test_cli_with_args() {
        let cli = Cli::parse_from([
            "mockapi",
            "-c",
            "custom.toml",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
        ]);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert_eq!(cli.host, Some("0.0.0.0".to_string()));
        assert_eq!(cli.port, Some(8080));
    }

    #[test]
    fn test_cli_rejects_bad_port() {
        assert!(Cli::try_parse_from(["mockapi", "--port", "99999"]).is_err());
    }
}
