use clap::ValueEnum;
use std::io;
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum LogLevel {
    No,
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn to_tracing_level(&self) -> Option<Level> {
        match self {
            LogLevel::No => None,
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Warning => Some(Level::WARN),
            LogLevel::Error => Some(Level::ERROR),
        }
    }
}

/// Installs the global subscriber. Logs go to stdout unless `log_file` names a
/// daily rolling file, in which case the returned guard must outlive the run.
pub fn init_logger(
    log_level: LogLevel,
    log_file: &str,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let level = log_level.to_tracing_level()?;

    let env_filter = EnvFilter::from_default_env().add_directive(LevelFilter::from_level(level).into());

    if !log_file.is_empty() {
        let file_appender = rolling::daily(".", log_file);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let subscriber = fmt()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_env_filter(env_filter)
            .with_file(false)
            .with_target(false)
            .finish();

        if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Couldn't install file logger: {err}");
            return None;
        }

        Some(guard)
    } else {
        let subscriber = fmt()
            .with_writer(io::stdout)
            .with_env_filter(env_filter)
            .with_file(false)
            .with_target(false)
            .finish();

        if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Couldn't install stdout logger: {err}");
        }
        None
    }
}
