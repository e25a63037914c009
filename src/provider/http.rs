use std::collections::HashSet;
use std::fs;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use crate::api::upstream::{UpstreamClient, parse_url};
use crate::config::Config;
use crate::error::AppError;
use crate::provider::DataProvider;
use crate::types::{Build, Device, OemIndex};

/// Builds are published per romtype; the web front-end only surfaces the
/// nightly channel.
const ROMTYPE: &str = "nightly";

#[derive(Debug, Deserialize)]
struct BuildsEnvelope {
    response: Vec<Build>,
}

/// Production data provider: devices.json (local file or official URL) with
/// an optional local overlay, the lineage-build-targets active set, and the
/// upstream build feed.
pub struct HttpDataProvider {
    config: Arc<Config>,
    upstream: UpstreamClient,
}

impl HttpDataProvider {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            upstream: UpstreamClient::new(),
        }
    }

    /// Merged device list. The local overlay replaces same-codename entries
    /// and appends unknown ones; a malformed overlay is skipped, a malformed
    /// main list is a hard failure.
    async fn load_devices(&self) -> Result<Vec<Device>, AppError> {
        let path = &self.config.devices_json_path;
        let mut devices: Vec<Device> = if path.exists() {
            let raw = fs::read_to_string(path).map_err(|e| {
                AppError::upstream(format!("failed to read {}: {e}", path.display()))
            })?;
            serde_json::from_str(&raw).map_err(|e| {
                AppError::upstream(format!("malformed device list in {}: {e}", path.display()))
            })?
        } else {
            let url = parse_url(&self.config.official_devices_json_url)?;
            info!(url = %url, "devices.json not present locally, fetching official list");
            self.upstream.get_json(url).await?
        };

        let local = &self.config.devices_local_json_path;
        if local.exists() {
            match fs::read_to_string(local)
                .map_err(|e| e.to_string())
                .and_then(|raw| serde_json::from_str::<Vec<Device>>(&raw).map_err(|e| e.to_string()))
            {
                Ok(overlay) => merge_devices(&mut devices, overlay),
                Err(e) => {
                    warn!(path = %local.display(), error = %e, "skipping malformed local device overlay");
                }
            }
        }

        Ok(devices)
    }

    /// Codenames currently receiving builds, from lineage-build-targets.
    async fn active_models(&self) -> Result<HashSet<String>, AppError> {
        let path = &self.config.lineage_build_targets_path;
        let raw = if path.exists() {
            fs::read_to_string(path).map_err(|e| {
                AppError::upstream(format!("failed to read {}: {e}", path.display()))
            })?
        } else {
            let url = parse_url(&self.config.official_lineage_build_targets_url)?;
            self.upstream.get_text(url).await?
        };
        Ok(parse_build_targets(&raw))
    }
}

#[async_trait]
impl DataProvider for HttpDataProvider {
    async fn list_oems(&self) -> Result<OemIndex, AppError> {
        let devices = self.load_devices().await?;
        let active = self.active_models().await?;

        let mut oems = OemIndex::new();
        for device in devices {
            if !active.is_empty() && !active.contains(&device.model) {
                continue;
            }
            oems.entry(device.oem.clone()).or_default().push(device);
        }
        for list in oems.values_mut() {
            list.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Ok(oems)
    }

    async fn get_device(&self, model: &str) -> Result<Device, AppError> {
        self.load_devices()
            .await?
            .into_iter()
            .find(|d| d.model == model)
            .ok_or_else(|| AppError::device_not_found(model))
    }

    async fn list_builds(&self, model: &str) -> Result<Vec<Build>, AppError> {
        let device = self.get_device(model).await?;

        let base = self.config.upstream_url.trim_end_matches('/');
        if base.is_empty() {
            return Err(AppError::upstream("UPSTREAM_URL is not configured"));
        }
        let url = parse_url(&format!("{base}/api/v1/{}/{ROMTYPE}/0", device.model))?;
        let envelope: BuildsEnvelope = self.upstream.get_json(url).await?;
        Ok(envelope.response)
    }
}

fn merge_devices(devices: &mut Vec<Device>, overlay: Vec<Device>) {
    for device in overlay {
        match devices.iter_mut().find(|d| d.model == device.model) {
            Some(slot) => *slot = device,
            None => devices.push(device),
        }
    }
}

/// One target per line, `codename branch period type`; `#` starts a comment.
fn parse_build_targets(raw: &str) -> HashSet<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_owned)
        .collect()
}
