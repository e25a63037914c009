use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

/// Environment variables the config listens to. Anything else in the
/// process environment is ignored.
const ENV_KEYS: &[&str] = &[
    "gerrit_url",
    "wiki_install_url",
    "wiki_info_url",
    "status_url",
    "upstream_url",
    "download_base_url",
    "devices_json_path",
    "devices_local_json_path",
    "official_devices_json_url",
    "device_deps_path",
    "official_device_deps_json_url",
    "lineage_build_targets_path",
    "official_lineage_build_targets_url",
    "cache_default_timeout",
    "cache_type",
    "version",
];

/// Immutable application configuration, read once at startup and passed by
/// reference through the router state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub gerrit_url: String,
    /// URL template; `{device}` is substituted with the codename.
    pub wiki_install_url: String,
    /// URL template; `{device}` is substituted with the codename.
    pub wiki_info_url: String,
    pub status_url: String,
    pub upstream_url: String,
    pub download_base_url: String,
    pub devices_json_path: PathBuf,
    pub devices_local_json_path: PathBuf,
    pub official_devices_json_url: String,
    pub device_deps_path: PathBuf,
    pub official_device_deps_json_url: String,
    pub lineage_build_targets_path: PathBuf,
    pub official_lineage_build_targets_url: String,
    /// Page cache expiry in seconds; 0 means entries never expire.
    pub cache_default_timeout: u64,
    /// Page cache backend: "simple" or "null".
    pub cache_type: String,
    pub version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gerrit_url: "https://review.lineageos.org".into(),
            wiki_install_url: "https://wiki.lineageos.org/devices/{device}/install".into(),
            wiki_info_url: "https://wiki.lineageos.org/devices/{device}".into(),
            status_url: "#".into(),
            upstream_url: String::new(),
            download_base_url: "https://mirrorbits.lineageos.org".into(),
            devices_json_path: "devices.json".into(),
            devices_local_json_path: "devices_local.json".into(),
            official_devices_json_url:
                "https://raw.githubusercontent.com/LineageOS/hudson/main/updater/devices.json"
                    .into(),
            device_deps_path: "device_deps.json".into(),
            official_device_deps_json_url:
                "https://raw.githubusercontent.com/LineageOS/hudson/main/updater/device_deps.json"
                    .into(),
            lineage_build_targets_path: "lineage-build-targets".into(),
            official_lineage_build_targets_url:
                "https://raw.githubusercontent.com/LineageOS/hudson/main/lineage-build-targets"
                    .into(),
            cache_default_timeout: 3600,
            cache_type: "simple".into(),
            version: "dev".into(),
        }
    }
}

impl Config {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(ENV_KEYS))
            .extract()
    }

    /// Version string as rendered in page footers, truncated to 6 chars.
    pub fn display_version(&self) -> &str {
        self.version.get(..6).unwrap_or(&self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_settings() {
        let cfg = Config::default();
        assert_eq!(cfg.cache_default_timeout, 3600);
        assert_eq!(cfg.cache_type, "simple");
        assert_eq!(cfg.version, "dev");
        assert_eq!(cfg.upstream_url, "");
        assert_eq!(cfg.devices_json_path, PathBuf::from("devices.json"));
        assert!(cfg.wiki_info_url.contains("{device}"));
    }

    #[test]
    fn display_version_truncates_to_six_chars() {
        let mut cfg = Config::default();
        assert_eq!(cfg.display_version(), "dev");

        cfg.version = "4f9c2a1deadbeef".into();
        assert_eq!(cfg.display_version(), "4f9c2a");
    }
}
