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

//! Fixed text layout for log lines: key=value pairs with a full (not
//! abbreviated) timestamp on every line, one line per event. No ANSI styling,
//! since files and pipes are the consumers, eg:
//!
//! ```text
//! time="2025-01-15T09:30:00+00:00" level=info target=my_app msg="started" port=8080
//! ```
//!
//! The `message` field is special: the `tracing` crate injects it
//! automatically for `info!("...")`-style calls, and it renders as
//! `msg="..."` here. Every other field renders as `name=value` after it:
//! numbers and booleans bare, anything textual double-quoted and escaped.

use std::fmt;

use chrono::{Local, SecondsFormat};
use tracing::{Event,
              Subscriber,
              field::{Field, Visit}};
use tracing_subscriber::{fmt::{FmtContext, FormatEvent, FormatFields, format::Writer},
                         registry::LookupSpan};

#[derive(Clone, Copy, Debug, Default)]
pub struct LogfmtFormatter;

/// RFC 3339 with seconds precision and the local UTC offset.
pub(crate) fn full_timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

pub(crate) fn tracing_level_token(level: tracing::Level) -> &'static str {
    match level {
        tracing::Level::ERROR => "error",
        tracing::Level::WARN => "warn",
        tracing::Level::INFO => "info",
        tracing::Level::DEBUG => "debug",
        tracing::Level::TRACE => "trace",
    }
}

/// Escape a value for inclusion inside a double-quoted logfmt value.
/// Backslashes, double quotes, and line-breaking control characters are
/// escaped, so the rendered record stays on one line no matter what the
/// caller logs.
pub(crate) fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

impl<S, N> FormatEvent<S, N> for LogfmtFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut f: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        write!(
            f,
            "time=\"{ts}\" level={level} target={target}",
            ts = full_timestamp(),
            level = tracing_level_token(*metadata.level()),
            target = metadata.target(),
        )?;

        let mut visitor = LogfmtFieldVisitor {
            writer: &mut f,
            result: Ok(()),
        };
        event.record(&mut visitor);
        visitor.result?;

        writeln!(f)
    }
}

/// Writes each recorded field as ` name=value` directly into the event
/// writer; the `message` field becomes ` msg="..."`. Numeric and boolean
/// values render bare; everything textual is double-quoted and escaped so
/// the record stays on one line.
struct LogfmtFieldVisitor<'a, 'w> {
    writer: &'a mut Writer<'w>,
    result: fmt::Result,
}

impl LogfmtFieldVisitor<'_, '_> {
    fn record_bare(&mut self, field: &Field, value: &dyn fmt::Display) {
        if self.result.is_err() {
            return;
        }
        self.result = write!(self.writer, " {}={value}", field.name());
    }
}

impl Visit for LogfmtFieldVisitor<'_, '_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if self.result.is_err() {
            return;
        }
        self.result = write!(
            self.writer,
            " {name}=\"{value}\"",
            name = visible_name(field),
            value = escape_value(value)
        );
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_bare(field, &value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record_bare(field, &value);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record_bare(field, &value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record_bare(field, &value);
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if self.result.is_err() {
            return;
        }
        self.result = write!(
            self.writer,
            " {name}=\"{value}\"",
            name = visible_name(field),
            value = escape_value(&format!("{value:?}"))
        );
    }
}

fn visible_name(field: &Field) -> &str {
    let name = field.name();
    if name == "message" { "msg" } else { name }
}
