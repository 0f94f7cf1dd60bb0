// Runtime settings. Everything has a working default so the CLI runs
// with no setup; environment variables exist mostly for tests and for
// pointing at a different provider deployment.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CATS_BASE_URL: &str = "https://cataas.com";
pub const DEFAULT_DISK_API_URL: &str = "https://cloud-api.yandex.net/v1/disk/resources";
pub const DEFAULT_AUTH_SCHEME: &str = "OAuth";
pub const DEFAULT_RECORD_PATH: &str = "backup_info.json";

/// Connect timeout applied to the image fetch only.
pub const IMAGE_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Endpoints, auth scheme and record location used by a backup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub cats_base_url: String,
    pub disk_api_url: String,
    pub auth_scheme: String,
    pub record_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            cats_base_url: DEFAULT_CATS_BASE_URL.into(),
            disk_api_url: DEFAULT_DISK_API_URL.into(),
            auth_scheme: DEFAULT_AUTH_SCHEME.into(),
            record_path: PathBuf::from(DEFAULT_RECORD_PATH),
        }
    }
}

impl Settings {
    /// Build settings from `CATAAS_BASE_URL`, `DISK_API_URL`,
    /// `DISK_AUTH_SCHEME` and `BACKUP_RECORD_PATH`, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Settings::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Settings {
            cats_base_url: get("CATAAS_BASE_URL").unwrap_or(defaults.cats_base_url),
            disk_api_url: get("DISK_API_URL").unwrap_or(defaults.disk_api_url),
            auth_scheme: get("DISK_AUTH_SCHEME").unwrap_or(defaults.auth_scheme),
            record_path: get("BACKUP_RECORD_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.record_path),
        }
    }
}
