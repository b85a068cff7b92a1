/*
 *   Copyright (c) 2025 R3BL LLC
 *   All rights reserved.
 *
 *   Licensed under the Apache License, Version 2.0 (the "License");
 *   you may not use this file except in compliance with the License.
 *   You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 *   Unless required by applicable law or agreed to in writing, software
 *   distributed under the License is distributed on an "AS IS" BASIS,
 *   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *   See the License for the specific language governing permissions and
 *   limitations under the License.
 */

//! Bridge for the legacy [`log`] facade. Code that still uses `log::info!`
//! and friends ends up on the same destination as code using `tracing`
//! macros, because this logger renders the same logfmt layout and writes it
//! through the shared [`LogSink`].

use std::io::Write as _;

use log::{Log, Metadata, Record};

use crate::{event_formatter::{escape_value, full_timestamp},
            sink::LogSink};

pub struct FacadeLogger {
    sink: LogSink,
}

impl std::fmt::Debug for FacadeLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacadeLogger")
            .field("destination", &self.sink.destination())
            .finish()
    }
}

impl FacadeLogger {
    #[must_use]
    pub fn new(sink: LogSink) -> Self { Self { sink } }
}

/// Install a [`FacadeLogger`] as the process-wide [`log`] logger, best
/// effort. Returns `false` when some other logger was installed first, in
/// which case the embedding program keeps its own facade wiring.
pub(crate) fn try_install(sink: LogSink) -> bool {
    log::set_boxed_logger(Box::new(FacadeLogger::new(sink))).is_ok()
}

/// Mirror a tracing level filter onto the [`log`] facade's max level.
pub(crate) fn to_log_level_filter(
    level_filter: tracing_core::LevelFilter,
) -> log::LevelFilter {
    match level_filter.into_level() {
        None => log::LevelFilter::Off,
        Some(tracing::Level::ERROR) => log::LevelFilter::Error,
        Some(tracing::Level::WARN) => log::LevelFilter::Warn,
        Some(tracing::Level::INFO) => log::LevelFilter::Info,
        Some(tracing::Level::DEBUG) => log::LevelFilter::Debug,
        Some(tracing::Level::TRACE) => log::LevelFilter::Trace,
    }
}

fn level_token(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "error",
        log::Level::Warn => "warn",
        log::Level::Info => "info",
        log::Level::Debug => "debug",
        log::Level::Trace => "trace",
    }
}

impl Log for FacadeLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "time=\"{ts}\" level={level} target={target} msg=\"{msg}\"\n",
            ts = full_timestamp(),
            level = level_token(record.level()),
            target = record.target(),
            msg = escape_value(&record.args().to_string()),
        );
        // Write failures are swallowed: a logger has nowhere to report them.
        let mut sink = self.sink.clone();
        let _ = sink.write_all(line.as_bytes());
    }

    fn flush(&self) {
        let mut sink = self.sink.clone();
        let _ = sink.flush();
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;
    use crate::sink::open_log_file;

    fn record<'a>(
        args: std::fmt::Arguments<'a>,
        level: log::Level,
    ) -> log::Record<'a> {
        log::Record::builder()
            .args(args)
            .level(level)
            .target("facade_test")
            .build()
    }

    #[test]
    #[serial]
    fn test_facade_logger_writes_logfmt_through_the_sink() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("facade.log");

        let sink = LogSink::new_stderr();
        sink.attach_file(open_log_file(&path).unwrap());
        let logger = FacadeLogger::new(sink);

        log::set_max_level(log::LevelFilter::Info);
        logger.log(&record(format_args!("hello from the facade"), log::Level::Info));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("level=info"));
        assert!(content.contains("target=facade_test"));
        assert!(content.contains("msg=\"hello from the facade\""));
        assert!(content.contains("time=\""));
    }

    #[test]
    #[serial]
    fn test_facade_logger_honors_max_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered.log");

        let sink = LogSink::new_stderr();
        sink.attach_file(open_log_file(&path).unwrap());
        let logger = FacadeLogger::new(sink);

        log::set_max_level(log::LevelFilter::Warn);
        logger.log(&record(format_args!("should be filtered"), log::Level::Info));
        logger.log(&record(format_args!("should pass"), log::Level::Warn));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("should be filtered"));
        assert!(content.contains("should pass"));
    }

    #[test]
    #[serial]
    fn test_facade_keeps_multiline_messages_on_one_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("multiline.log");

        let sink = LogSink::new_stderr();
        sink.attach_file(open_log_file(&path).unwrap());
        let logger = FacadeLogger::new(sink);

        log::set_max_level(log::LevelFilter::Info);
        logger.log(&record(format_args!("first\nsecond"), log::Level::Info));

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches('\n').count(), 1);
        assert!(content.contains(r#"msg="first\nsecond""#));
    }

    #[test]
    fn test_level_filter_mirroring() {
        use tracing_core::LevelFilter;
        let cases = [
            (LevelFilter::OFF, log::LevelFilter::Off),
            (LevelFilter::ERROR, log::LevelFilter::Error),
            (LevelFilter::WARN, log::LevelFilter::Warn),
            (LevelFilter::INFO, log::LevelFilter::Info),
            (LevelFilter::DEBUG, log::LevelFilter::Debug),
            (LevelFilter::TRACE, log::LevelFilter::Trace),
        ];
        for (tracing_side, log_side) in cases {
            assert_eq!(to_log_level_filter(tracing_side), log_side);
        }
    }
}
