use tracing::{debug, warn};

/// Open `url` in the platform's default browser without blocking startup.
/// Failures are logged and otherwise ignored.
pub fn launch(url: String) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        debug!("Opening browser at {}", url);
        if let Err(e) = open::that(&url) {
            warn!("Failed to open browser at {}: {}", url, e);
        }
    })
}
