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

use tracing_core::LevelFilter;
use tracing_subscriber::{Registry, layer::SubscriberExt, reload};

use crate::{event_formatter::LogfmtFormatter, sink::LogSink};

/// Handle for swapping the minimum severity after the subscriber is
/// installed. The global tracing dispatcher can be set only once per process,
/// so repeated reconfiguration goes through this instead.
pub type ReloadHandle = reload::Handle<LevelFilter, Registry>;

/// Minimum severity before the first `configure` call.
pub(crate) const DEFAULT_LEVEL_FILTER: LevelFilter = LevelFilter::INFO;

/// Assemble the subscriber: a reloadable level filter, and a fmt layer that
/// renders [`LogfmtFormatter`] lines into the given [`LogSink`]. This does
/// not install anything; the caller decides between the global and the
/// thread-local scope.
pub(crate) fn create_subscriber(
    sink: LogSink,
) -> (impl tracing::Subscriber + Send + Sync, ReloadHandle) {
    let (level_layer, level_handle) = reload::Layer::new(DEFAULT_LEVEL_FILTER);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .event_format(LogfmtFormatter)
        .with_ansi(false)
        .with_writer(sink);
    let subscriber = tracing_subscriber::registry()
        .with(level_layer)
        .with(fmt_layer);
    (subscriber, level_handle)
}
