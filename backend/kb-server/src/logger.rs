use crate::error::{Result as ServerErrorResult, ServerError};

use std::panic::Location;
use std::path::PathBuf;
use std::time::SystemTime;

use error_location::ErrorLocation;
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::info;

/// Initialize logger with fern
///
/// # Arguments
/// * `log_level` - Log level filter
/// * `log_file` - Optional path to log file. None = stdout, Some = file output
/// * `colored` - Enable colored output (ignored when logging to file)
#[track_caller]
pub fn initialize(
    log_level: kb_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let caller = Location::caller();
    let level_filter = log_level.0;

    let dispatch = if let Some(ref log_path) = log_file {
        let file = fern::log_file(log_path).map_err(|e| ServerError::Logger {
            message: format!("Failed to open log file {}: {}", log_path.display(), e),
            location: ErrorLocation::from(caller),
        })?;

        plain_format(Dispatch::new()).chain(file)
    } else if colored {
        let colors = ColoredLevelConfig::new()
            .trace(Color::Magenta)
            .debug(Color::Blue)
            .info(Color::Green)
            .warn(Color::Yellow)
            .error(Color::Red);

        Dispatch::new()
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "[{date} - {level}] {message} [{file}:{line}]",
                    date = humantime::format_rfc3339(SystemTime::now()),
                    level = colors.color(record.level()),
                    message = message,
                    file = record.file().unwrap_or("unknown"),
                    line = record.line().unwrap_or(0),
                ))
            })
            .chain(std::io::stdout())
    } else {
        // Plain output for non-TTY (systemd, docker logs)
        plain_format(Dispatch::new()).chain(std::io::stdout())
    };

    Dispatch::new()
        .level(level_filter)
        // sqlx logs every statement at info
        .level_for("sqlx", log::LevelFilter::Warn)
        .chain(dispatch)
        .apply()
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to initialize logger: {e}"),
            location: ErrorLocation::from(caller),
        })?;

    match log_file {
        Some(path) => info!(
            "Logger initialized: level={:?}, file={}",
            level_filter,
            path.display()
        ),
        None => info!("Logger initialized: level={:?}, stdout", level_filter),
    }

    // Bridge tracing to log
    tracing_log::LogTracer::init().ok();

    Ok(())
}

fn plain_format(dispatch: Dispatch) -> Dispatch {
    dispatch.format(|out, message, record| {
        out.finish(format_args!(
            "[{date} - {level}] {message} [{file}:{line}]",
            date = humantime::format_rfc3339(SystemTime::now()),
            level = record.level(),
            message = message,
            file = record.file().unwrap_or("unknown"),
            line = record.line().unwrap_or(0),
        ))
    })
}
