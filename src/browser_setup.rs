//! Chrome/Chromium executable detection for the headless provider.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{Result, SearchError};

/// Well-known Chrome/Chromium executable paths per platform.
#[cfg(target_os = "macos")]
const KNOWN_PATHS: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
];

#[cfg(not(target_os = "macos"))]
const KNOWN_PATHS: &[&str] = &[
    "/opt/google/chrome/chrome",
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
];

/// Well-known command names to search in PATH.
const KNOWN_COMMANDS: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
];

/// Detects a Chrome/Chromium installation.
///
/// Checks, in order: the `CHROME` environment variable, well-known command
/// names in `PATH`, well-known filesystem paths. Paths that do not exist
/// are skipped.
pub fn detect_chrome() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(crate::config::CHROME) {
        let p = PathBuf::from(&path);
        if p.exists() {
            debug!("Chrome found via CHROME env var: {}", path);
            return Some(p);
        }
    }

    for cmd in KNOWN_COMMANDS {
        if let Ok(path) = which::which(cmd) {
            debug!("Chrome found in PATH: {}", path.display());
            return Some(path);
        }
    }

    KNOWN_PATHS
        .iter()
        .map(Path::new)
        .find(|p| p.exists())
        .map(|p| {
            debug!("Chrome found at known path: {}", p.display());
            p.to_path_buf()
        })
}

/// Returns a Chrome executable or an error telling the user how to set one.
pub fn ensure_chrome() -> Result<PathBuf> {
    match detect_chrome() {
        Some(path) => {
            info!("Using system Chrome: {}", path.display());
            Ok(path)
        }
        None => Err(SearchError::Browser(
            "No Chrome/Chromium installation found. Install Chrome or set CHROME to its executable path."
                .to_string(),
        )),
    }
}
