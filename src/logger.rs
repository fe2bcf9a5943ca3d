use crate::model::LoggingConfig;
use env_logger::{Builder, Target};
use log::{Level, LevelFilter, SetLoggerError};
use std::env;
use std::io::Write;

/// Module whose debug output carries every statement sent to the backend.
const SQL_TRACE_MODULE: &str = "catalog_bridge::executor";

/// Install an env_logger for embedding hosts. `RUST_LOG` overrides the
/// configured level.
pub fn setup_logger(config: &LoggingConfig) -> Result<(), SetLoggerError> {
    let mut builder = Builder::new();
    builder.filter(None, parse_level(&config.level));
    if config.log_sql {
        builder.filter(Some(SQL_TRACE_MODULE), LevelFilter::Debug);
    }
    builder.target(Target::Stdout);

    builder.format(|buf, record| {
        let prefix = match record.level() {
            Level::Error => "ERROR ",
            Level::Warn => "WARN ",
            Level::Info | Level::Debug | Level::Trace => "",
        };
        writeln!(buf, "{}{}", prefix, record.args())
    });

    if env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    }

    builder.try_init()
}

fn parse_level(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::Info)
}
