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

//! The one place log bytes go through. Both the `tracing` fmt layer and the
//! legacy [`log`] facade bridge write via [`LogSink`], so switching the sink
//! reroutes every logging entry point in the process at once.

use std::{fs::{File, OpenOptions},
          io::{self, Write},
          path::Path,
          sync::{Arc, Mutex, MutexGuard}};

use tracing_subscriber::fmt::MakeWriter;

/// The currently selected destination.
///
/// Invariant: at most one file handle opened by this crate is held at a time.
/// Replacing a [`SinkState::File`] drops the previous [`File`], which closes
/// it. Close errors are swallowed (`File::drop` semantics); that data-loss
/// window is an accepted policy, not a bug.
///
/// `stderr`/`stdout` are borrowed per write via [`io::stderr`]/[`io::stdout`]
/// and never closed.
#[derive(Debug)]
enum SinkState {
    Stderr,
    Stdout,
    File(File),
}

/// Which destination a [`LogSink`] currently points at. Useful for callers
/// that want to report or assert where log output is going.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    Stderr,
    Stdout,
    File,
}

/// Cloneable handle over the process-wide log destination. You can safely
/// clone this struct, since it only contains an `Arc<Mutex<SinkState>>`; all
/// clones point at the same underlying state.
#[derive(Clone, Debug)]
pub struct LogSink {
    state: Arc<Mutex<SinkState>>,
}

impl LogSink {
    /// A new sink pointing at standard error, holding no file handle.
    #[must_use]
    pub fn new_stderr() -> Self {
        Self {
            state: Arc::new(Mutex::new(SinkState::Stderr)),
        }
    }

    /// Point the sink at standard error. Drops (closes) any held file handle.
    pub fn redirect_to_stderr(&self) { *self.lock() = SinkState::Stderr; }

    /// Point the sink at standard output. Drops (closes) any held file handle.
    pub fn redirect_to_stdout(&self) { *self.lock() = SinkState::Stdout; }

    /// Point the sink at an open log file, taking ownership of the handle.
    /// Drops (closes) any previously held file handle.
    pub fn attach_file(&self, file: File) { *self.lock() = SinkState::File(file); }

    #[must_use]
    pub fn destination(&self) -> Destination {
        match *self.lock() {
            SinkState::Stderr => Destination::Stderr,
            SinkState::Stdout => Destination::Stdout,
            SinkState::File(_) => Destination::File,
        }
    }

    /// The sink must keep accepting writes even if a thread panicked while
    /// holding the lock, so poisoning is shrugged off.
    fn lock(&self) -> MutexGuard<'_, SinkState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut *self.lock() {
            SinkState::Stderr => io::stderr().write(buf),
            SinkState::Stdout => io::stdout().write(buf),
            SinkState::File(file) => file.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.lock() {
            SinkState::Stderr => io::stderr().flush(),
            SinkState::Stdout => io::stdout().flush(),
            SinkState::File(file) => file.flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer { self.clone() }
}

/// Open a log file for read/write, creating it if absent, appending to
/// existing content, with 0666 permissions (before umask) on unix.
pub(crate) fn open_log_file(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.read(true).append(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o666);
    }
    options.open(path)
}
