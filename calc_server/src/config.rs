//! Command-line and environment configuration.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use clap::Parser;

/// Sender used when `EMAIL_FROM` is not set
pub const DEFAULT_FROM_ADDRESS: &str = "Building Estimator <reports@example.com>";

/// Command-line arguments for the estimator server
#[derive(Parser, Debug)]
#[command(name = "calc_server")]
#[command(about = "Building material estimator: JSON estimates, PDF reports and email delivery")]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// PDF render timeout in milliseconds
    #[arg(long, default_value = "10000")]
    pub render_timeout_ms: u64,

    /// Resend API key; without it emails are only logged
    #[arg(long, env = "RESEND_API_KEY", hide_env_values = true)]
    pub resend_api_key: Option<String>,

    /// Sender address for report emails
    #[arg(long, env = "EMAIL_FROM", default_value = DEFAULT_FROM_ADDRESS)]
    pub from_address: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Immutable server configuration, shared by all requests.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub render_timeout: Duration,
    pub resend_api_key: Option<String>,
    pub from_address: String,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            render_timeout: Duration::from_millis(10_000),
            resend_api_key: None,
            from_address: DEFAULT_FROM_ADDRESS.to_string(),
        }
    }
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        ServerConfig {
            host: args.host,
            port: args.port,
            render_timeout: Duration::from_millis(args.render_timeout_ms),
            resend_api_key: args.resend_api_key.filter(|key| !key.trim().is_empty()),
            from_address: args.from_address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["calc_server", "--port", "8080"]).unwrap();
        let config = ServerConfig::from(args);
        assert_eq!(config.port, 8080);
        assert_eq!(config.render_timeout, Duration::from_secs(10));
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_blank_api_key_means_log_only() {
        let args = Args::try_parse_from(["calc_server", "--resend-api-key", "  "]).unwrap();
        assert!(ServerConfig::from(args).resend_api_key.is_none());
    }

    #[test]
    fn test_bad_host_rejected() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }
}
