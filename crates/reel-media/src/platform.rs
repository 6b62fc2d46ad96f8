use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;

/// URL prefix under which scanned files are served.
pub const MEDIA_URL_PREFIX: &str = "/videos/";

pub fn config_dir() -> PathBuf {
    // On macOS and Linux, always use ~/.config/reel/
    // (avoid macOS Application Support folder for consistency)
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("reel")
    }

    #[cfg(not(unix))]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("reel")
    }
}

/// URL a local browser should open to reach a server listening on `port`.
pub fn local_url(port: u16) -> String {
    format!("http://localhost:{}", port)
}
