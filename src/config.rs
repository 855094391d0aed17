use std::time::Duration;

use clap::Parser;

use crate::router::MatchMode;

/// Serves the demo player API.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
#[command(version)]
pub struct Config {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:4221")]
    pub addr: String,

    /// How GET templates are matched against request paths.
    #[arg(long, value_enum, default_value_t = MatchMode::Literal)]
    pub mode: MatchMode,

    /// Seconds to wait for a request on an idle connection.
    #[arg(long, default_value_t = 10)]
    pub read_timeout_secs: u64,
}

impl Config {
    pub fn read_timeout(&self) -> Option<Duration> {
        match self.read_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::Parser;

    use crate::router::MatchMode;

    use super::Config;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["arity-router"]).unwrap();
        assert_eq!(config.addr, "127.0.0.1:4221");
        assert_eq!(config.mode, MatchMode::Literal);
        assert_eq!(config.read_timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_args() {
        let config = Config::try_parse_from([
            "arity-router",
            "--addr",
            "0.0.0.0:8080",
            "--mode",
            "arity",
            "--read-timeout-secs",
            "0",
        ])
        .unwrap();
        assert_eq!(config.addr, "0.0.0.0:8080");
        assert_eq!(config.mode, MatchMode::Arity);
        assert_eq!(config.read_timeout(), None);
    }

    #[test]
    fn test_bad_mode() {
        assert!(Config::try_parse_from(["arity-router", "--mode", "regex"]).is_err());
    }
}
