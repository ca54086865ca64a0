//! Tracing setup.
//!
//! Levels are numeric, as in the config file and `--debug-level`:
//! 10 debug, 20 info, 30 warning, 40 error, 50 critical.

use std::fs::{self, File, OpenOptions};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::CliError;

/// Rotated log files kept next to the active one.
const MAX_LOG_FILES: usize = 5;

const BACKUP_DATE_FORMAT: &str = "%Y-%m-%d";

const OWN_TARGETS: [&str; 4] = ["hmip", "hmip_api", "hmip_core", "hmip_config"];

/// Map a numeric level onto a tracing level name.
pub fn level_name(level: u8) -> &'static str {
    match level {
        0..=9 => "trace",
        10..=19 => "debug",
        20..=29 => "info",
        30..=39 => "warn",
        _ => "error",
    }
}

/// Filter directives: our crates at `level`, dependencies no chattier
/// than warn.
fn directives(level: u8) -> String {
    let ours = level_name(level);
    let deps = if level < 30 { "warn" } else { ours };
    let mut out = deps.to_owned();
    for target in OWN_TARGETS {
        out.push_str(&format!(",{target}={ours}"));
    }
    out
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
///
/// Logs go to stderr, or to `file` (rolled at local midnight) when one is
/// configured. The returned guard must be held until exit so buffered lines are flushed.
pub fn init(level: u8, file: Option<&Path>) -> Result<Option<WorkerGuard>, CliError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)));

    let Some(path) = file else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_target(false),
            )
            .init();
        return Ok(None);
    };

    let appender = file_appender(path)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    Ok(Some(guard))
}

fn file_appender(path: &Path) -> Result<DailyFile, CliError> {
    DailyFile::open(path).map_err(|e| CliError::LogFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

// ── Daily log file ──────────────────────────────────────────────────

/// Log file that stays at the configured path. On the first write after
/// local midnight the current file is renamed to `{path}.{YYYY-MM-DD}`
/// and the oldest backups beyond [`MAX_LOG_FILES`] are removed.
struct DailyFile {
    path: PathBuf,
    file: File,
    day: NaiveDate,
}

impl DailyFile {
    fn open(path: &Path) -> io::Result<Self> {
        fs::create_dir_all(parent_dir(path))?;
        let file = append_to(path)?;
        let modified = file.metadata()?.modified()?;
        Ok(Self {
            path: path.to_owned(),
            file,
            day: DateTime::<Local>::from(modified).date_naive(),
        })
    }

    fn backup_path(&self, day: NaiveDate) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{}", day.format(BACKUP_DATE_FORMAT)));
        PathBuf::from(name)
    }

    fn roll(&mut self, today: NaiveDate) -> io::Result<()> {
        self.file.flush()?;
        fs::rename(&self.path, self.backup_path(self.day))?;
        self.file = append_to(&self.path)?;
        self.day = today;
        self.prune()
    }

    fn prune(&self) -> io::Result<()> {
        let Some(prefix) = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| format!("{name}."))
        else {
            return Ok(());
        };

        let is_backup = |p: &PathBuf| {
            p.file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.strip_prefix(&prefix))
                .is_some_and(|date| NaiveDate::parse_from_str(date, BACKUP_DATE_FORMAT).is_ok())
        };
        let mut backups: Vec<PathBuf> = fs::read_dir(parent_dir(&self.path))?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(is_backup)
            .collect();

        // ISO dates sort chronologically
        backups.sort();
        let excess = backups.len().saturating_sub(MAX_LOG_FILES);
        for old in backups.drain(..excess) {
            fs::remove_file(old)?;
        }
        Ok(())
    }

    fn write_on(&mut self, today: NaiveDate, buf: &[u8]) -> io::Result<usize> {
        if today > self.day {
            self.roll(today)?;
        }
        self.file.write(buf)
    }
}

impl Write for DailyFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_on(Local::now().date_naive(), buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

fn append_to(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
