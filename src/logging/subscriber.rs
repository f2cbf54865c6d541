//! Console and log-file output for `tracing` events.
use std::fmt::{self, Write as _};
use std::fs;
use std::io::Write as _;
use std::sync::Mutex;

use tracing::Level;
use tracing::field::{Field, Visit};

use super::utils::{format_utc_datetime, format_utc_time, log_file_path, strip_ansi};

/// Tracing target used for stage headers.
pub(super) const STAGE_TARGET: &str = "private_folder::stage";

/// How an event is rendered, independent of where it goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Stage,
    Error,
    Warn,
    Info,
    Debug,
}

impl LineKind {
    fn of(level: Level, target: &str) -> Self {
        match level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO if target == STAGE_TARGET => Self::Stage,
            Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Plain-text rendering for the log file.
    fn plain(self, ts: &str, msg: &str) -> String {
        match self {
            Self::Stage => format!("[{ts}] ==> {msg}"),
            Self::Error => format!("[{ts}]     [error] {msg}"),
            Self::Warn => format!("[{ts}]     [warn] {msg}"),
            Self::Debug => format!("[{ts}]     [debug] {msg}"),
            Self::Info => format!("[{ts}]     {msg}"),
        }
    }

    /// Coloured rendering for the terminal.
    fn colored(self, out: &mut impl fmt::Write, msg: &str) -> fmt::Result {
        match self {
            Self::Stage => writeln!(out, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            Self::Error => writeln!(out, "\x1b[31mERROR\x1b[0m {msg}"),
            Self::Warn => writeln!(out, "\x1b[33mWARN\x1b[0m  {msg}"),
            Self::Info => writeln!(out, "  {msg}"),
            Self::Debug => writeln!(out, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Pull the `message` field out of an event and classify it.
fn read_event(event: &tracing::Event<'_>) -> (LineKind, String) {
    #[derive(Default)]
    struct Message(String);

    impl Visit for Message {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "message" {
                self.0.clear();
                let _ = write!(self.0, "{value:?}");
            }
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            if field.name() == "message" {
                value.clone_into(&mut self.0);
            }
        }
    }

    let mut message = Message::default();
    event.record(&mut message);
    let meta = event.metadata();
    (LineKind::of(*meta.level(), meta.target()), message.0)
}

/// Appends every event to `<cache-dir>/private-folder/<command>.log`,
/// timestamped and without colour codes.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Start a fresh log for `command` with a version header. `None` when
    /// the cache directory or the file is unusable; logging then stays
    /// console-only.
    pub(super) fn new(command: &str) -> Option<Self> {
        let path = log_file_path(command)?;
        let rule = "=".repeat(42);
        let header = format!(
            "{rule}\nprivate-folder {} {}\n{rule}\n",
            crate::cli::VERSION,
            format_utc_datetime(),
        );
        fs::write(&path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(&path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let (kind, msg) = read_event(event);
        let line = kind.plain(&format_utc_time(), &strip_ansi(&msg));
        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// Terminal output: `==>` stage headers, indented details, coloured
/// warnings and errors.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> fmt::Result {
        let (kind, msg) = read_event(event);
        kind.colored(&mut writer, &msg)
    }
}

/// Install the process-wide subscriber. Call once, first thing in `main`.
///
/// Warnings and errors print to stderr, the rest to stdout; debug lines
/// reach the console only with `verbose`. The log file for `command`
/// receives everything from debug up.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let make_writer = std::io::stderr
        .with_max_level(Level::WARN)
        .and(std::io::stdout.with_min_level(Level::INFO));

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(make_writer)
        .with_filter(console_level);

    let file_layer = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt as _;

    #[test]
    fn events_are_classified_by_level_and_target() {
        assert_eq!(LineKind::of(Level::INFO, STAGE_TARGET), LineKind::Stage);
        assert_eq!(LineKind::of(Level::INFO, "other"), LineKind::Info);
        assert_eq!(LineKind::of(Level::WARN, STAGE_TARGET), LineKind::Warn);
        assert_eq!(LineKind::of(Level::TRACE, "other"), LineKind::Debug);
    }

    #[test]
    fn colored_stage_line() {
        let mut out = String::new();
        LineKind::Stage.colored(&mut out, "Summary").unwrap();
        assert_eq!(strip_ansi(&out), "==> Summary\n");
    }

    #[test]
    fn file_layer_writes_formatted_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");
        fs::write(&path, "").unwrap();
        let file = fs::OpenOptions::new().append(true).open(&path).unwrap();
        let layer = FileLayer {
            file: Mutex::new(file),
        };

        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: STAGE_TARGET, "Provisioning");
            tracing::warn!("\x1b[33mcareful\x1b[0m");
            tracing::debug!("detail");
        });

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3, "{content}");
        assert!(lines.first().unwrap().ends_with("==> Provisioning"));
        assert!(lines.get(1).unwrap().ends_with("[warn] careful"));
        assert!(lines.get(2).unwrap().ends_with("[debug] detail"));
    }
}
