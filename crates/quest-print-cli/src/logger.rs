use chrono::Local;
use log::{Level, Metadata, Record};
use std::io::Write;

/// Timestamped logger writing to stderr so stdout stays clean for reports
pub struct CliLogger {
    level: Level,
}

impl CliLogger {
    pub fn new(verbose: u8) -> Self {
        let level = match verbose {
            0 => Level::Warn,
            1 => Level::Info,
            _ => Level::Debug,
        };
        Self { level }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let filter = self.level.to_level_filter();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(filter);
        Ok(())
    }
}

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let mut stderr = std::io::stderr().lock();
            // Nothing sensible to do if stderr is gone
            let _ = writeln!(
                stderr,
                "{} {:<5} {}: {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    #[test]
    fn test_verbosity_raises_level() {
        let quiet = CliLogger::new(0);
        let chatty = CliLogger::new(2);
        let info = Metadata::builder().level(Level::Info).build();

        assert!(!quiet.enabled(&info));
        assert!(chatty.enabled(&info));
    }
}
