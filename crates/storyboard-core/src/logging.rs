use tracing_subscriber::EnvFilter;

/// Environment variable naming a file that receives verbose debug logs.
pub const DEBUG_LOG_ENV: &str = "STORYBOARD_DEBUG_LOG";

/// Install the global tracing subscriber.
///
/// With `STORYBOARD_DEBUG_LOG` set, everything down to DEBUG goes to that file
/// with source locations. Otherwise only warnings reach stderr, so command
/// output on stdout stays machine-readable. `RUST_LOG` overrides either level.
pub fn init_tracing() -> std::io::Result<()> {
    if let Ok(log_path) = std::env::var(DEBUG_LOG_ENV) {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_env_filter(filter_or("debug"))
            .with_writer(log_file)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter_or("warn"))
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn filter_or(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
