//! The `log::Log` implementation.

use log::{Log, Metadata, Record};

use crate::error::InstallError;
use crate::severity::{self, levels, Severity};

/// Forwards `log` records into `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogBridge {
    min_severity: u8,
}

impl LogBridge {
    pub fn new(min_severity: u8) -> Self {
        Self { min_severity }
    }

    /// Register as the process-wide `log` logger.
    pub fn install(self) -> Result<(), InstallError> {
        let max = Severity::numeric(self.min_severity).log_filter();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max);
        Ok(())
    }

    /// The severity a bridged record renders with. `log` names its levels
    /// `WARN`, `INFO`, ... so names the table doesn't know fall back to the
    /// numeric equivalent.
    pub fn severity_of(record_level: log::Level) -> Severity {
        levels().resolve(record_level.as_str(), severity::of_log(record_level))
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        severity::of_log(metadata.level()) >= self.min_severity
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // Filters see the record's own target; the event carries the
        // caller as `log.*` fields.
        let _ = tracing_log::format_trace(record);
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_falls_back_to_number() {
        let warn = LogBridge::severity_of(log::Level::Warn);
        assert_eq!(warn.no, severity::WARNING);
        assert_eq!(warn.name, None);

        let info = LogBridge::severity_of(log::Level::Info);
        assert_eq!(info, Severity::named("INFO", severity::INFO));
    }

    #[test]
    fn test_enabled_respects_minimum() {
        let bridge = LogBridge::new(severity::WARNING);
        let info = Metadata::builder().level(log::Level::Info).build();
        let error = Metadata::builder().level(log::Level::Error).build();
        assert!(!bridge.enabled(&info));
        assert!(bridge.enabled(&error));
        assert!(LogBridge::default().enabled(&info));
    }
}
