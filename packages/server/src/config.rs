//! Command-line and environment configuration.

use std::time::Duration;

use clap::Parser;

/// Default lifetime of a join ticket, in seconds.
pub const DEFAULT_JOIN_TICKET_TTL_SECS: u64 = 120;

#[derive(Parser, Debug, Clone)]
#[command(name = "carechat-server")]
#[command(about = "Family chat room server for the carechat memory-care assistant", long_about = None)]
pub struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "CARECHAT_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "CARECHAT_PORT", default_value = "8080")]
    pub port: u16,

    /// Seconds a join ticket stays valid for the WebSocket connect
    #[arg(
        long,
        env = "CARECHAT_JOIN_TICKET_TTL_SECS",
        default_value_t = DEFAULT_JOIN_TICKET_TTL_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub join_ticket_ttl_secs: u64,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "CARECHAT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Resolved server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub join_ticket_ttl: Duration,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            join_ticket_ttl: Duration::from_secs(DEFAULT_JOIN_TICKET_TTL_SECS),
            log_level: "info".to_string(),
        }
    }
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            join_ticket_ttl: Duration::from_secs(args.join_ticket_ttl_secs),
            log_level: args.log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        // テスト項目: 引数なしでデフォルト値の設定になる
        // given (前提条件):
        let argv = ["carechat-server"];

        // when (操作):
        let config = ServerConfig::from(Args::try_parse_from(argv).unwrap());

        // then (期待する結果):
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.join_ticket_ttl, Duration::from_secs(120));
    }

    #[test]
    fn test_args_overrides() {
        // テスト項目: 引数で各設定を上書きできる
        // given (前提条件):
        let argv = [
            "carechat-server",
            "--host",
            "0.0.0.0",
            "-p",
            "3000",
            "--join-ticket-ttl-secs",
            "30",
            "--log-level",
            "debug",
        ];

        // when (操作):
        let config = ServerConfig::from(Args::try_parse_from(argv).unwrap());

        // then (期待する結果):
        assert_eq!(
            config,
            ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                join_ticket_ttl: Duration::from_secs(30),
                log_level: "debug".to_string(),
            }
        );
    }

    #[test]
    fn test_zero_ticket_ttl_is_rejected() {
        // テスト項目: 有効期間 0 秒のチケットは設定できない
        // given (前提条件):
        let argv = ["carechat-server", "--join-ticket-ttl-secs", "0"];

        // when (操作):
        let result = Args::try_parse_from(argv);

        // then (期待する結果):
        assert!(result.is_err());
    }
}
