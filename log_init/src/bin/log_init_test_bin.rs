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

use r3bl_log_init::LogManager;

/// This is the binary under test, which is tested by the `test_bin_stdio`
/// test module in `tracing_init.rs`.
///
/// It takes 3 arguments: log dir, log file name (or the sentinels
/// "stdout"/"stderr"/"-"), and log level. It configures logging accordingly,
/// emits one event per severity, and exits non-zero if configuration fails.
/// There is no easy way to actually test `stdout` and `stderr` without
/// spawning a new process, so this is the best way to test it.
///
/// See:
/// 1. Test module: `test_bin_stdio` in `tracing_init.rs`
/// 2. Binary under test: `log_init_test_bin.rs` <- you are here
/// 3. `assert_cmd` : <https://docs.rs/assert_cmd/latest/assert_cmd/index.html>
fn main() -> miette::Result<()> {
    let mut args = std::env::args().skip(1);
    let log_dir = args.next().unwrap_or_default();
    let log_file_name = args.next().unwrap_or_else(|| "stderr".to_string());
    let log_level = args.next().unwrap_or_else(|| "debug".to_string());

    let (log_manager, default_guard) = LogManager::install_thread_local();
    log_manager.configure(&log_dir, &log_file_name, &log_level)?;

    // Log some messages.
    tracing::error!("error");
    tracing::warn!("warn");
    tracing::info!("info");
    tracing::debug!("debug");
    tracing::trace!("trace");

    drop(default_guard);
    Ok(())
}
