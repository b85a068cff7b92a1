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

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;
use tracing_core::metadata::ParseLevelFilterError;
use tracing_subscriber::{reload, util::TryInitError};

/// Everything that can go wrong while installing or reconfiguring the
/// process-wide logging setup.
///
/// Both [`InitLogError::InvalidLevel`] and [`InitLogError::OpenLogFile`] are
/// surfaced only *after* log output has been redirected to standard error, so
/// subsequent diagnostics are never silently dropped. It is up to the
/// embedding program to decide whether a logging misconfiguration should
/// abort startup; this crate never terminates the process.
#[derive(Debug, Error, Diagnostic)]
pub enum InitLogError {
    /// The caller supplied a severity name the logging facility does not
    /// recognize. The configured level and formatter are left untouched.
    #[error("unrecognized log level {input:?}")]
    #[diagnostic(
        code(r3bl_log_init::invalid_level),
        help("recognized levels are: off, error, warn, info, debug, trace")
    )]
    InvalidLevel {
        input: String,
        #[source]
        source: ParseLevelFilterError,
    },

    /// The composed log file path could not be opened (missing directory,
    /// permissions, path is a directory, ...).
    #[error("failed to open log file {}", path.display())]
    #[diagnostic(code(r3bl_log_init::open_log_file))]
    OpenLogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The global tracing dispatcher can only be installed once per process.
    #[error("failed to install the global tracing subscriber")]
    #[diagnostic(code(r3bl_log_init::subscriber_install))]
    SubscriberInstall(#[from] TryInitError),

    /// The level reload handle outlived its subscriber. Only possible when a
    /// thread-local subscriber guard has already been dropped.
    #[error("failed to apply the new log level")]
    #[diagnostic(code(r3bl_log_init::level_reload))]
    LevelReload(#[from] reload::Error),
}
