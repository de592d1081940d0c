use std::io::Write;

use anyhow::{anyhow, Result};
use env_logger::{fmt::Formatter, Builder, Target};
use log::Level;

use crate::cli::LogLevel;

pub fn init_logger(level: LogLevel, timestamps: bool) -> Result<()> {
    let mut builder = Builder::new();
    builder
        .filter_level(level.to_filter())
        .write_style(env_logger::WriteStyle::Never)
        .target(Target::Stderr)
        .format(move |buf: &mut Formatter, record| {
            if timestamps {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            writeln!(buf, "{} {}", level_tag(record.level()), record.args())
        });

    builder
        .try_init()
        .map_err(|e| anyhow!("logger init failed: {e}"))
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
