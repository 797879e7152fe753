//! src/logger.rs
//!
//! Configuratie van `flexi_logger` voor de CLI. De bibliotheek zelf logt
//! alleen via de `log`-facade.

use flexi_logger::{
    style, Age, Cleanup, Criterion, DeferredNow, Duplicate, FileSpec, Logger, LoggerHandle,
    Naming, WriteMode,
};
use log::{debug, Level, Record};

/// Start de logger met filter `level` (bijv. `"info"` of `"udgraph=debug"`).
///
/// Zonder `log_dir` gaat alles naar stderr. Met een map wordt per dag een
/// logbestand geschreven; `verbose` kopieert dan alle regels naar stdout in
/// plaats van alleen waarschuwingen. De handle moet blijven leven zolang er
/// gelogd wordt.
pub fn configure(
    level: &str,
    log_dir: Option<&str>,
    verbose: bool,
) -> Result<LoggerHandle, Box<dyn std::error::Error>> {
    let logger = Logger::try_with_str(level)?.format(colour_format);
    let handle = match log_dir {
        Some(dir) => {
            let dup = if verbose { Duplicate::All } else { Duplicate::Warn };
            let handle = logger
                .log_to_file(FileSpec::default().directory(dir))
                .duplicate_to_stdout(dup)
                .write_mode(WriteMode::BufferAndFlush)
                .rotate(
                    Criterion::Age(Age::Day),
                    Naming::Timestamps,
                    Cleanup::KeepLogFiles(1),
                )
                .start()?;
            debug!("logging to directory: {}", dir);
            handle
        }
        None => logger.log_to_stderr().start()?,
    };
    Ok(handle)
}

fn colour_format(
    out: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    rec: &Record,
) -> Result<(), std::io::Error> {
    let level = rec.level();
    write!(
        out,
        "[{}] {} {}:{}: {}",
        style(Level::Debug).paint(now.format("%H:%M:%S%.3f").to_string()),
        style(level).paint(level.to_string()),
        rec.file().unwrap_or("<unknown>"),
        rec.line().unwrap_or(0),
        rec.args()
    )
}
