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

use std::fmt;

use tracing::dispatcher;

use crate::{error::InitLogError,
            facade,
            sink::{Destination, LogSink, open_log_file},
            tracing_config::{DisplayPreference, WriterConfig, try_parse_level},
            tracing_init::{DEFAULT_LEVEL_FILTER, ReloadHandle, create_subscriber}};

/// Flag names and help strings for embedding programs that expose the three
/// logging inputs on their command line. Using these keeps flag spelling
/// consistent between the daemon and its CLI.
pub mod flags {
    pub const LOG_DIR: &str = "logdir";
    pub const LOG_DIR_HELP: &str = "Directory to store log files";
    pub const LOG_FILE: &str = "logfile";
    pub const LOG_FILE_HELP: &str = "Name for log file";
    pub const LOG_LEVEL: &str = "loglevel";
    pub const LOG_LEVEL_HELP: &str = "Severity of messages to be logged";
}

/// Owns the process-wide log setup: the switchable [`LogSink`] and the handle
/// for reloading the minimum severity. Cloning is cheap and every clone
/// controls the same underlying setup.
///
/// Lifecycle: install once ([`LogManager::install_global`] for apps,
/// [`LogManager::install_thread_local`] for tests), then call
/// [`LogManager::configure`] as often as needed; each call is a full
/// reconfiguration. [`LogManager::shutdown`] releases the held file handle.
///
/// All mutation goes through a mutex-protected sink and the reload handle, so
/// calling `configure` from multiple threads is safe, if unusual.
#[derive(Clone)]
pub struct LogManager {
    sink: LogSink,
    level_handle: ReloadHandle,
    facade_installed: bool,
}

impl fmt::Debug for LogManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogManager")
            .field("destination", &self.destination())
            .field("facade_installed", &self.facade_installed)
            .finish()
    }
}

impl LogManager {
    /// Install the subscriber as the global default, and funnel the legacy
    /// [`log`] facade into the same sink. Call this as early as possible when
    /// a process starts; the global dispatcher cannot be replaced later.
    ///
    /// Initial state until [`LogManager::configure`] is called: destination
    /// stderr, minimum severity info.
    ///
    /// # Errors
    ///
    /// [`InitLogError::SubscriberInstall`] if a global dispatcher is already
    /// installed.
    pub fn install_global() -> Result<Self, InitLogError> {
        use tracing_subscriber::util::SubscriberInitExt;

        let sink = LogSink::new_stderr();
        let (subscriber, level_handle) = create_subscriber(sink.clone());
        subscriber.try_init()?;

        // Best effort: if the embedding program already installed a `log`
        // logger, keep its wiring.
        let facade_installed = facade::try_install(sink.clone());
        if facade_installed {
            log::set_max_level(facade::to_log_level_filter(DEFAULT_LEVEL_FILTER));
        }

        Ok(Self {
            sink,
            level_handle,
            facade_installed,
        })
    }

    /// Install the subscriber for the current thread only, and return the
    /// guard that keeps it active. This is great for tests: every test can
    /// have its own independent setup. The process-global [`log`] facade is
    /// left alone.
    #[must_use]
    pub fn install_thread_local() -> (Self, dispatcher::DefaultGuard) {
        let sink = LogSink::new_stderr();
        let (subscriber, level_handle) = create_subscriber(sink.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (
            Self {
                sink,
                level_handle,
                facade_installed: false,
            },
            guard,
        )
    }

    /// Fully reconfigure the log setup from the three inputs. Safe to call
    /// repeatedly; each call closes the previously opened log file (if any)
    /// before anything else.
    ///
    /// Ordered behavior:
    /// 1. Redirect output to stderr, dropping any held file handle. This
    ///    happens regardless of the outcome of the steps below, so on any
    ///    failure subsequent log output still appears on stderr instead of
    ///    being silently lost.
    /// 2. Parse `log_level` (case-insensitive). On failure, emit a
    ///    debug-severity diagnostic and return [`InitLogError::InvalidLevel`];
    ///    the previously configured level stays in effect.
    /// 3. Apply the parsed level (the fixed logfmt formatter with full
    ///    timestamps is installed once and never changes).
    /// 4. Resolve the destination: `"stderr"`/`"-"` → standard error,
    ///    `"stdout"` → standard output, anything else →
    ///    `log_dir/log_file_name` opened in append mode (created 0666 if
    ///    absent). On open failure, emit a debug-severity diagnostic and
    ///    return [`InitLogError::OpenLogFile`].
    ///
    /// # Errors
    ///
    /// [`InitLogError::InvalidLevel`], [`InitLogError::OpenLogFile`], or
    /// [`InitLogError::LevelReload`] if the thread-local subscriber this
    /// manager belongs to has already been dropped.
    pub fn configure(
        &self,
        log_dir: &str,
        log_file_name: &str,
        log_level: &str,
    ) -> Result<(), InitLogError> {
        // Close the previously opened log file.
        self.sink.redirect_to_stderr();

        let level_filter = match try_parse_level(log_level) {
            Ok(it) => it,
            Err(err) => {
                tracing::debug!(
                    message = "Failed to parse log level",
                    log_level,
                    error = %err
                );
                return Err(err);
            }
        };

        self.level_handle.reload(level_filter)?;
        if self.facade_installed {
            log::set_max_level(facade::to_log_level_filter(level_filter));
        }

        match WriterConfig::from_dir_and_file(log_dir, log_file_name) {
            WriterConfig::Display(DisplayPreference::Stderr) => {
                // Already redirected in step 1.
            }
            WriterConfig::Display(DisplayPreference::Stdout) => {
                self.sink.redirect_to_stdout();
            }
            WriterConfig::File(path) => match open_log_file(&path) {
                Ok(file) => self.sink.attach_file(file),
                Err(source) => {
                    tracing::debug!(
                        message = "Failed to open log file",
                        path = %path.display(),
                        error = %source
                    );
                    return Err(InitLogError::OpenLogFile { path, source });
                }
            },
        }

        Ok(())
    }

    /// Close the held log file (if any) and point output back at stderr.
    /// There is no process-exit hook; call this when the embedding program
    /// is done logging.
    pub fn shutdown(&self) { self.sink.redirect_to_stderr(); }

    /// Where log output currently goes.
    #[must_use]
    pub fn destination(&self) -> Destination { self.sink.destination() }
}

/// Convenience for the common case: install the global subscriber and apply
/// the three inputs in one call.
///
/// On error the subscriber stays installed with output on stderr, so the
/// embedding program can log the failure and decide whether to abort startup.
///
/// # Errors
///
/// See [`LogManager::install_global`] and [`LogManager::configure`].
pub fn try_initialize_logging_global(
    log_dir: &str,
    log_file_name: &str,
    log_level: &str,
) -> Result<LogManager, InitLogError> {
    let manager = LogManager::install_global()?;
    manager.configure(log_dir, log_file_name, log_level)?;
    Ok(manager)
}
