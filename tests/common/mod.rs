#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;

use updater_web::config::Config;
use updater_web::error::AppError;
use updater_web::provider::DataProvider;
use updater_web::router::{UpdaterState, updater_router};
use updater_web::types::{Build, BuildFile, Device, OemIndex};

/// In-memory stand-in for the production data provider. Counts build
/// fetches so the cache tests can tell a hit from a miss.
pub struct StubProvider {
    devices: Vec<Device>,
    builds: HashMap<String, Vec<Build>>,
    fail_builds: bool,
    pub build_calls: AtomicUsize,
}

impl StubProvider {
    pub fn new(devices: Vec<Device>) -> Self {
        Self {
            devices,
            builds: HashMap::new(),
            fail_builds: false,
            build_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_builds(mut self, model: &str, builds: Vec<Build>) -> Self {
        self.builds.insert(model.to_owned(), builds);
        self
    }

    /// Every build fetch fails as an upstream error.
    pub fn failing_builds(mut self) -> Self {
        self.fail_builds = true;
        self
    }
}

#[async_trait]
impl DataProvider for StubProvider {
    async fn list_oems(&self) -> Result<OemIndex, AppError> {
        let mut oems = OemIndex::new();
        for device in &self.devices {
            oems.entry(device.oem.clone()).or_default().push(device.clone());
        }
        Ok(oems)
    }

    async fn get_device(&self, model: &str) -> Result<Device, AppError> {
        self.devices
            .iter()
            .find(|d| d.model == model)
            .cloned()
            .ok_or_else(|| AppError::device_not_found(model))
    }

    async fn list_builds(&self, model: &str) -> Result<Vec<Build>, AppError> {
        self.build_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_builds {
            return Err(AppError::upstream("build feed unavailable"));
        }
        self.get_device(model).await?;
        Ok(self.builds.get(model).cloned().unwrap_or_default())
    }
}

pub fn device(model: &str, oem: &str, name: &str) -> Device {
    Device {
        model: model.into(),
        oem: oem.into(),
        name: name.into(),
        lineage_recovery: None,
    }
}

pub fn file(name: &str) -> BuildFile {
    BuildFile {
        filename: name.into(),
        filepath: format!("/full/bacon/20240115/{name}"),
        size: 4096,
    }
}

pub fn build(files: Vec<BuildFile>) -> Build {
    Build {
        datetime: 1_705_276_800,
        date: "2024-01-15".into(),
        romtype: "nightly".into(),
        version: "21.0".into(),
        files,
    }
}

pub fn app(provider: Arc<StubProvider>) -> Router {
    app_with_config(Config::default(), provider)
}

pub fn app_with_config(config: Config, provider: Arc<StubProvider>) -> Router {
    updater_router(UpdaterState::new(Arc::new(config), provider))
}
