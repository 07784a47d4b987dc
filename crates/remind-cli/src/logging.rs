use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const TIME_FORMAT: &str = "%H:%M:%S";

/// Appends to `log_yyyy_MM_dd.log` in a directory, picking the file by the
/// local date at the moment each line is written.
#[derive(Debug, Clone)]
pub struct DailyLogFile {
    dir: PathBuf,
}

impl DailyLogFile {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn current_path(&self) -> PathBuf {
        self.dir
            .join(Local::now().format("log_%Y_%m_%d.log").to_string())
    }

    fn open(&self) -> io::Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.current_path())
    }
}

impl<'a> MakeWriter<'a> for DailyLogFile {
    type Writer = Box<dyn Write + 'a>;

    fn make_writer(&'a self) -> Self::Writer {
        // A log line that cannot be written is dropped.
        match self.open() {
            Ok(file) => Box::new(file),
            Err(_) => Box::new(io::sink()),
        }
    }
}

fn filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug,sqlx=warn")
    } else {
        EnvFilter::new("error")
    }
}

/// Installs the global subscriber: the daily file always, stderr as well when verbose.
pub fn init(log_dir: &Path, verbose: bool) -> anyhow::Result<()> {
    let file_layer = fmt::layer()
        .with_writer(DailyLogFile::new(log_dir))
        .with_ansi(false)
        .with_target(false)
        .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
        .with_filter(filter(verbose));

    let stderr_layer = verbose.then(|| {
        fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
            .with_filter(filter(verbose))
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;
    Ok(())
}
