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

use std::path::{Path, PathBuf};

use tracing_core::LevelFilter;

use crate::error::InitLogError;

/// Reserved file name that selects standard error instead of a file.
pub const STDERR_DEST: &str = "stderr";
/// Shorthand alias for [`STDERR_DEST`]. Matched exactly, not case folded.
pub const STDERR_DEST_ALIAS: &str = "-";
/// Reserved file name that selects standard output instead of a file.
pub const STDOUT_DEST: &str = "stdout";

/// The preferred display to use when log output goes to a standard stream
/// rather than a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

/// Where log lines should be written: one of the standard streams, or a file
/// path composed from the log directory and file name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriterConfig {
    Display(DisplayPreference),
    File(PathBuf),
}

impl WriterConfig {
    /// Resolve the destination from the log directory and file name inputs.
    ///
    /// The sentinel file names `"stderr"` (any case) and `"-"` select standard
    /// error, `"stdout"` (any case) selects standard output. Any other value
    /// is a literal file name joined onto `log_dir`. The directory is ignored
    /// when a sentinel matches.
    #[must_use]
    pub fn from_dir_and_file(log_dir: &str, log_file_name: &str) -> Self {
        if log_file_name.eq_ignore_ascii_case(STDERR_DEST)
            || log_file_name == STDERR_DEST_ALIAS
        {
            return Self::Display(DisplayPreference::Stderr);
        }
        if log_file_name.eq_ignore_ascii_case(STDOUT_DEST) {
            return Self::Display(DisplayPreference::Stdout);
        }
        Self::File(Path::new(log_dir).join(log_file_name))
    }
}

/// Parse a textual severity name (case folded to lowercase) into a
/// [`LevelFilter`]. Recognized names: `off`, `error`, `warn`, `info`,
/// `debug`, `trace`. The numeric forms `"0"` through `"5"` (in that same
/// order) are accepted too, since [`LevelFilter`]'s own parser recognizes
/// them.
///
/// # Errors
///
/// [`InitLogError::InvalidLevel`] when the name is not recognized.
pub fn try_parse_level(input: &str) -> Result<LevelFilter, InitLogError> {
    input
        .to_lowercase()
        .parse::<LevelFilter>()
        .map_err(|source| InitLogError::InvalidLevel {
            input: input.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_stderr_sentinels_select_stderr() {
        for file_name in ["stderr", "STDERR", "Stderr", "-"] {
            assert_eq!(
                WriterConfig::from_dir_and_file("/var/log", file_name),
                WriterConfig::Display(DisplayPreference::Stderr),
                "file name: {file_name:?}"
            );
        }
    }

    #[test]
    fn test_stdout_sentinel_selects_stdout() {
        for file_name in ["stdout", "STDOUT", "StdOut"] {
            assert_eq!(
                WriterConfig::from_dir_and_file("/var/log", file_name),
                WriterConfig::Display(DisplayPreference::Stdout),
                "file name: {file_name:?}"
            );
        }
    }

    #[test]
    fn test_dash_is_matched_exactly_but_other_names_are_files() {
        // "--" is not the alias, so it is a literal file name.
        assert_eq!(
            WriterConfig::from_dir_and_file("/var/log", "--"),
            WriterConfig::File(PathBuf::from("/var/log/--"))
        );
    }

    #[test]
    fn test_ordinary_file_name_joins_the_directory() {
        assert_eq!(
            WriterConfig::from_dir_and_file("/tmp/logs", "app.log"),
            WriterConfig::File(PathBuf::from("/tmp/logs/app.log"))
        );
    }

    #[test]
    fn test_empty_directory_yields_bare_file_name() {
        assert_eq!(
            WriterConfig::from_dir_and_file("", "app.log"),
            WriterConfig::File(PathBuf::from("app.log"))
        );
    }

    #[test]
    fn test_parse_level_accepts_all_recognized_names_case_insensitively() {
        let cases = [
            ("off", LevelFilter::OFF),
            ("error", LevelFilter::ERROR),
            ("warn", LevelFilter::WARN),
            ("info", LevelFilter::INFO),
            ("debug", LevelFilter::DEBUG),
            ("trace", LevelFilter::TRACE),
            ("DEBUG", LevelFilter::DEBUG),
            ("Info", LevelFilter::INFO),
            ("WaRn", LevelFilter::WARN),
            // Numeric forms accepted by LevelFilter's own parser.
            ("0", LevelFilter::OFF),
            ("1", LevelFilter::ERROR),
            ("5", LevelFilter::TRACE),
        ];
        for (input, expected) in cases {
            assert_eq!(try_parse_level(input).unwrap(), expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_parse_level_rejects_unrecognized_names() {
        for input in ["verbose", "not-a-level", ""] {
            let err = try_parse_level(input).unwrap_err();
            assert!(
                matches!(err, InitLogError::InvalidLevel { .. }),
                "input: {input:?}"
            );
        }
    }
}
