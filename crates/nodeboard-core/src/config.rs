use std::env;
use tracing::Level;

const DEFAULT_LOG_LEVEL: Level = Level::INFO;

/// Driver settings. Environment first, then command-line flags on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: Level,
    /// Also log each response pretty-printed at debug level on stderr.
    /// Protocol output on stdout stays one compact object per line.
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL,
            pretty: false,
        }
    }
}

impl Config {
    /// Read `NODEBOARD_LOG`, `NODEBOARD_PRETTY`, then `--log <level>` and `--pretty`.
    pub fn from_env_and_args() -> Self {
        Self::from_sources(
            env::var("NODEBOARD_LOG").ok().as_deref(),
            env::var("NODEBOARD_PRETTY").ok().as_deref(),
            env::args().skip(1),
        )
    }

    pub fn from_sources<I>(log: Option<&str>, pretty: Option<&str>, args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        if let Some(level) = log.and_then(|l| l.trim().parse().ok()) {
            config.log_level = level;
        }
        if let Some(flag) = pretty {
            config.pretty = parse_bool(flag);
        }

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--pretty" => config.pretty = true,
                "--log" => {
                    if let Some(level) = args.next().and_then(|l| l.parse().ok()) {
                        config.log_level = level;
                    }
                }
                _ => {}
            }
        }
        config
    }
}

fn parse_bool(s: &str) -> bool {
    matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
