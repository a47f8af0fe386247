//! Tracing subscriber setup for engine-tune.
//!
//! Behaviour is driven by environment variables:
//! - `RUST_LOG` / `LOG_LEVEL`: filter directives (default `warn`)
//! - `LOG_OUTPUT`: `console` (default), `file`, `both` or `off`
//! - `LOG_FORMAT`: `human` (default), `json` or `compact`
//! - `LOG_FILE_PATH`: log file location for `file`/`both`
//!
//! Console output goes to stderr so command output on stdout stays clean.

use std::{
    env,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, fmt::MakeWriter, prelude::*, registry, EnvFilter};

// --- Custom "Tee" Writer ---
struct Tee<A, B> {
    a: A,
    b: B,
}

impl<A, B> Write for Tee<A, B>
where
    A: Write,
    B: Write,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let res_a = self.a.write(buf);
        let res_b = self.b.write(buf);
        res_a.or(res_b)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.a.flush()?;
        self.b.flush()
    }
}

#[derive(Clone)]
struct MakeTee<A, B> {
    make_a: A,
    make_b: B,
}

impl<'a, A, B, W1, W2> MakeWriter<'a> for MakeTee<A, B>
where
    A: MakeWriter<'a, Writer = W1>,
    B: MakeWriter<'a, Writer = W2>,
    W1: Write + 'a,
    W2: Write + 'a,
{
    type Writer = Tee<W1, W2>;
    fn make_writer(&'a self) -> Self::Writer {
        Tee {
            a: self.make_a.make_writer(),
            b: self.make_b.make_writer(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Console,
    File,
    Both,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Human,
    Json,
    Compact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub output: LogOutput,
    pub format: LogFormat,
    pub file_path: PathBuf,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            output: LogOutput::Console,
            format: LogFormat::Human,
            file_path: env::temp_dir().join("engine-tune.log"),
        }
    }
}

impl LogSettings {
    /// Read settings from the environment, falling back to defaults for
    /// missing or unrecognised values.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let output = match lookup("LOG_OUTPUT").as_deref() {
            Some("file") => LogOutput::File,
            Some("both") => LogOutput::Both,
            Some("off") => LogOutput::Off,
            _ => LogOutput::Console,
        };
        let format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            Some("compact") => LogFormat::Compact,
            _ => LogFormat::Human,
        };

        Self {
            level: lookup("LOG_LEVEL").unwrap_or(defaults.level),
            output,
            format,
            file_path: lookup("LOG_FILE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.file_path),
        }
    }
}

// Installs `$layer` on `$subscriber` in the requested format.
macro_rules! install {
    ($subscriber:expr, $layer:expr, $format:expr) => {
        match $format {
            LogFormat::Json => $subscriber.with($layer.json()).try_init(),
            LogFormat::Compact => $subscriber.with($layer.compact()).try_init(),
            LogFormat::Human => $subscriber.with($layer).try_init(),
        }
    };
}

/// Initializes the global tracing subscriber from environment variables.
///
/// The returned guard must be held for the lifetime of the program when
/// file output is enabled, otherwise buffered lines are lost.
pub fn init_subscriber() -> Option<WorkerGuard> {
    init_with(&LogSettings::from_env())
}

/// Initializes the global tracing subscriber from explicit settings.
///
/// Calling this more than once is harmless: later calls leave the first
/// subscriber in place.
pub fn init_with(settings: &LogSettings) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let subscriber = registry().with(env_filter);

    let log_dir = settings
        .file_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(env::temp_dir);
    let log_filename = settings
        .file_path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "engine-tune.log".into());

    let mut guard: Option<WorkerGuard> = None;

    let installed = match settings.output {
        LogOutput::Off => subscriber.try_init(),
        LogOutput::Console => {
            let fmt_layer = fmt::layer().with_writer(io::stderr);
            install!(subscriber, fmt_layer, settings.format)
        }
        LogOutput::File => {
            let file_appender = tracing_appender::rolling::daily(&log_dir, &log_filename);
            let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
            guard = Some(file_guard);

            let fmt_layer = fmt::layer().with_ansi(false).with_writer(non_blocking);
            install!(subscriber, fmt_layer, settings.format)
        }
        LogOutput::Both => {
            let file_appender = tracing_appender::rolling::daily(&log_dir, &log_filename);
            let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
            guard = Some(file_guard);

            let tee_writer = MakeTee {
                make_a: io::stderr,
                make_b: non_blocking,
            };
            let fmt_layer = fmt::layer().with_ansi(false).with_writer(tee_writer);
            install!(subscriber, fmt_layer, settings.format)
        }
    };

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed; keeping existing one");
    }

    guard
}
