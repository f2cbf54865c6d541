//! Utility functions for path resolution, ANSI stripping, and time formatting.
use std::fs;
use std::path::{Path, PathBuf};

use crate::platform;

/// Strip ANSI escape sequences from a string.
///
/// Handles SGR sequences (ending in `m`) and other CSI sequences (ending
/// in any letter in the `@`..`~` range), so cursor movement, erase, etc.
/// are also stripped without consuming unrelated text.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if let Some(next) = chars.next()
                && next == '['
            {
                for inner in chars.by_ref() {
                    if ('@'..='~').contains(&inner) {
                        break;
                    }
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Return `<cache_root>/private-folder/<command>.log`.
pub(super) fn log_file_in(cache_root: &Path, command: &str) -> PathBuf {
    cache_root
        .join("private-folder")
        .join(format!("{command}.log"))
}

/// Return the log file path under the per-user cache root, creating its
/// directory if needed.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let path = log_file_in(&platform::cache_root()?, command);
    fs::create_dir_all(path.parent()?).ok()?;
    Some(path)
}

/// Format the current UTC time as `YYYY-MM-DD HH:MM:SS`.
pub(super) fn format_utc_datetime() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format the current UTC time as `HH:MM:SS`.
pub(super) fn format_utc_time() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_ansi_removes_sgr_sequences() {
        assert_eq!(strip_ansi("\x1b[1;34m==>\x1b[0m done"), "==> done");
    }

    #[test]
    fn strip_ansi_removes_erase_sequences() {
        assert_eq!(strip_ansi("\r\x1b[Kline"), "\rline");
    }

    #[test]
    fn strip_ansi_keeps_plain_text() {
        assert_eq!(strip_ansi("plain [text]"), "plain [text]");
    }

    #[test]
    fn log_file_lives_under_tool_directory() {
        assert_eq!(
            log_file_in(Path::new("/home/u/.cache"), "init"),
            PathBuf::from("/home/u/.cache/private-folder/init.log")
        );
    }

    #[test]
    fn time_formats_have_expected_shape() {
        assert_eq!(format_utc_datetime().len(), "2024-01-01 00:00:00".len());
        assert_eq!(format_utc_time().len(), "00:00:00".len());
    }
}
