use std::path::Path;
use tracing::Subscriber;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Build the application subscriber without installing it.
///
/// In debug mode the level is `debug` and `RUST_LOG` may override it. Without
/// debug logging we force `info` regardless of `RUST_LOG`, so a variable left
/// in the user's environment cannot turn on verbose output. When `log_file`
/// is given, output goes to that file instead of stdout.
pub fn build_subscriber(
    debug: bool,
    log_file: Option<&Path>,
) -> anyhow::Result<impl Subscriber + Send + Sync> {
    let level = if debug { "debug" } else { "info" };
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let (writer, ansi) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("log path {} has no file name", path.display()))?;
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::never(dir, file_name);
            (BoxMakeWriter::new(appender), false)
        }
        None => (BoxMakeWriter::new(std::io::stdout), true),
    };

    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .finish())
}

/// Install the global subscriber. Later calls are ignored once one is set.
pub fn init(debug: bool, log_file: Option<&Path>) {
    match build_subscriber(debug, log_file) {
        Ok(subscriber) => {
            let _ = tracing::subscriber::set_global_default(subscriber);
        }
        Err(err) => {
            eprintln!("failed to initialise logging: {err}");
        }
    }
}
