use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::{Mutex, Once};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber when `RUST_LOG` is set. Output goes to
/// `log_path`, never the terminal: the TUI owns the screen.
pub fn init(log_path: &Path) {
    if let Ok(filter) = std::env::var("RUST_LOG") {
        init_with_filter(&filter, log_path);
    }
}

pub fn init_with_filter(filter: &str, log_path: &Path) {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // Runs before the TUI takes the screen, so stderr is still visible.
        let file = match open_log_file(log_path) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("maestra: logging disabled, cannot open {}: {e}", log_path.display());
                return;
            }
        };

        let fmt_layer = fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_ansi(false)
            .with_level(true)
            .compact()
            .with_writer(Mutex::new(file));

        let filter_layer = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    });
}

fn open_log_file(log_path: &Path) -> io::Result<File> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_writes_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logs").join("maestra.log");
        init_with_filter("info", &path);
        tracing::info!("hello from test");
        assert!(path.exists());
    }

    #[test]
    fn unopenable_log_path_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        assert!(open_log_file(&blocker.join("maestra.log")).is_err());
    }
}
