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

//! Common log initialization for a daemon and its CLI, so that neither has to
//! reimplement destination/level selection. Call
//! [`try_initialize_logging_global`] as early as possible when a process
//! starts, with three inputs:
//!
//! 1. `log_dir` - directory for the log file.
//! 2. `log_file_name` - file name, or one of the sentinels `"stderr"`, `"-"`
//!    (both standard error) or `"stdout"` (standard output).
//! 3. `log_level` - case-insensitive minimum severity (`off`, `error`,
//!    `warn`, `info`, `debug`, `trace`).
//!
//! ```no_run
//! use r3bl_log_init::try_initialize_logging_global;
//!
//! fn main() -> miette::Result<()> {
//!     let log_manager =
//!         try_initialize_logging_global("/tmp/logs", "app.log", "debug")?;
//!
//!     tracing::info!(message = "daemon starting", pid = std::process::id());
//!     log::info!("legacy call sites land in the same file");
//!
//!     log_manager.shutdown();
//!     Ok(())
//! }
//! ```
//!
//! Every line is rendered in a fixed key=value layout with a full timestamp
//! (see [`LogfmtFormatter`]). Both the [`tracing`] macros and the legacy
//! [`log`] macros funnel into the same sink, so all logging in the process
//! ends up on the same destination.
//!
//! On any configuration failure (unrecognized level, unopenable file) output
//! falls back to standard error *before* the error is returned, so
//! diagnostics are never silently dropped. Repeated calls to
//! [`LogManager::configure`] fully reconfigure the setup and close the
//! previously opened log file; at most one file handle is held at a time.

#![warn(clippy::all)]
#![warn(clippy::unwrap_in_result)]
#![warn(rust_2018_idioms)]

// Attach sources.
pub mod error;
pub mod event_formatter;
pub mod facade;
pub mod public_api;
pub mod sink;
pub mod tracing_config;
pub mod tracing_init;

#[cfg(test)]
pub(crate) mod test_fixtures;

// Re-export.
pub use error::*;
pub use event_formatter::*;
pub use facade::*;
pub use public_api::*;
pub use sink::*;
pub use tracing_config::*;
pub use tracing_init::*;
