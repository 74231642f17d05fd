//! Resolving the external tool executable
//!
//! Resolution order: a copy already on the search path, then a previously
//! downloaded copy in the locator's data directory, then the first
//! successful fetch from an ordered list of download URLs. Failures short of
//! exhaustion are silent: a URL that cannot be fetched is logged and the
//! next one tried. Exhausting all three strategies yields `None` rather than
//! an error; the missing tool surfaces as the OS spawn failure on first use.

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Binary names probed on the search path, most specific first
pub const TOOL_BINARY_NAMES: [&str; 2] = ["freimgedcs.exe", "freimgedcs"];

/// Published locations of the tool, tried in order
pub const DEFAULT_DOWNLOAD_URLS: [&str; 2] = [
    "https://github.com/NIKDISSV-Forever/UniversalIMG/blob/main/pyimgedit/freimgedcs.exe?raw=true",
    "https://storage.googleapis.com/google-code-archive-downloads/v2/code.google.com/freimgedcs/freimgedcs.exe",
];

/// Where and how to look for the tool executable
#[derive(Debug, Clone)]
pub struct ToolLocator {
    /// Probe the `PATH` environment for an installed copy first
    pub search_path: bool,
    /// Directory holding (or receiving) a downloaded copy
    pub data_dir: PathBuf,
    /// Ordered download fallback URLs
    pub download_urls: Vec<String>,
    /// Binary names probed on the search path
    pub binary_names: Vec<String>,
}

impl Default for ToolLocator {
    fn default() -> Self {
        Self {
            search_path: true,
            data_dir: dirs::data_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("imgedit"),
            download_urls: DEFAULT_DOWNLOAD_URLS.iter().map(ToString::to_string).collect(),
            binary_names: TOOL_BINARY_NAMES.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ToolLocator {
    /// Resolve the executable, downloading it if necessary
    ///
    /// `None` means every strategy was exhausted; callers defer that to the
    /// first real invocation instead of failing here.
    pub async fn resolve(&self) -> Option<PathBuf> {
        if self.search_path {
            if let Some(found) = self.find_on_path() {
                debug!(path = %found.display(), "tool found on search path");
                return Some(found);
            }
        }
        let local = self.local_copy_path();
        if local.is_file() {
            debug!(path = %local.display(), "using previously downloaded tool");
            return Some(local);
        }
        self.download().await
    }

    /// Where a downloaded copy lives inside the data directory
    pub fn local_copy_path(&self) -> PathBuf {
        let name = self
            .binary_names
            .first()
            .map_or(TOOL_BINARY_NAMES[0], String::as_str);
        self.data_dir.join(name)
    }

    fn find_on_path(&self) -> Option<PathBuf> {
        let path_var = std::env::var_os("PATH")?;
        for dir in std::env::split_paths(&path_var) {
            for name in &self.binary_names {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
        None
    }

    async fn download(&self) -> Option<PathBuf> {
        let target = self.local_copy_path();
        for url in &self.download_urls {
            match self.download_one(url, &target).await {
                Ok(()) => {
                    debug!(url, path = %target.display(), "tool downloaded");
                    return Some(target);
                }
                Err(error) => {
                    warn!(url, %error, "tool download failed, trying next source");
                }
            }
        }
        None
    }

    async fn download_one(&self, url: &str, target: &Path) -> Result<()> {
        let response = reqwest::get(url).await?.error_for_status()?;
        let body = response.bytes().await?;
        tokio::fs::create_dir_all(&self.data_dir).await?;
        tokio::fs::write(target, &body).await?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(target, std::fs::Permissions::from_mode(0o755)).await?;
        }
        Ok(())
    }
}
