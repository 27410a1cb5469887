use std::str::FromStr;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

#[derive(Debug, clap::Args)]
/// Options controlling the log output.
///
/// Logs are always written to stderr, stdout only carries command output.
pub struct LogOptions {
    #[arg(long, env = "LNX_LOG_LEVEL", default_value = "warn")]
    /// Filter log events, e.g. `warn,lnx_column=debug` shows column buffer
    /// growth and compaction on top of any warnings.
    log_level: String,
    #[arg(long, env = "LNX_LOG_JSON")]
    /// Emit one JSON object per log event.
    log_json: bool,
    #[arg(long, env = "LNX_LOG_NO_ANSI")]
    /// Disable ANSI colour codes, useful when stderr is redirected to a file.
    log_no_ansi: bool,
}

impl LogOptions {
    /// Installs the global subscriber described by these options.
    pub fn init(&self) -> Result<()> {
        let filter = EnvFilter::from_str(&self.log_level)
            .with_context(|| format!("Parse log level {:?}", self.log_level))?;

        let builder = tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(self.log_json)
            .with_ansi(!self.log_no_ansi);

        if self.log_json {
            builder.json().init();
        } else {
            builder.compact().init();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        logs: LogOptions,
    }

    #[test]
    fn test_defaults_to_warn() {
        let harness = Harness::try_parse_from(["lnx"]).expect("Parse args");
        assert_eq!(harness.logs.log_level, "warn");
        assert!(!harness.logs.log_json);
        assert!(!harness.logs.log_no_ansi);
    }

    #[test]
    fn test_json_and_level_flags() {
        let harness = Harness::try_parse_from([
            "lnx",
            "--log-level",
            "info,lnx_column=debug",
            "--log-json",
        ])
        .expect("Parse args");
        assert_eq!(harness.logs.log_level, "info,lnx_column=debug");
        assert!(harness.logs.log_json);
    }
}
