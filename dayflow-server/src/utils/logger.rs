//! Logging Infrastructure
//!
//! Structured logging with `tracing-subscriber`. `RUST_LOG` wins over the
//! configured level when set. With a log directory, output goes to a daily
//! rolling file instead of stdout.

use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Initialize the logger with defaults (info, plain text, stdout)
pub fn init_logger() {
    init_logger_with_file(None, None, None);
}

/// Initialize the logger with optional JSON format and file output
pub fn init_logger_with_file(log_level: Option<&str>, json: Option<bool>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(level)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let writer = match log_dir.and_then(prepare_log_dir) {
        Some(dir) => BoxMakeWriter::new(tracing_appender::rolling::daily(dir, "dayflow-server")),
        None => BoxMakeWriter::new(std::io::stdout),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    // try_init: a second call (tests, embedding) keeps the first subscriber
    let result = if json.unwrap_or(false) {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("Logger already initialized: {e}");
    }
}

fn default_directives(level: &str) -> String {
    format!("{level},dayflow_server={level},tower_http=info,sqlx=warn")
}

fn prepare_log_dir(dir: &str) -> Option<&str> {
    let path = Path::new(dir);
    if let Err(e) = std::fs::create_dir_all(path) {
        eprintln!("Cannot create log directory {dir}: {e}, logging to stdout");
        return None;
    }
    Some(dir)
}
