pub mod http;

use async_trait::async_trait;

use crate::error::AppError;
use crate::types::{Build, Device, OemIndex};

pub use http::HttpDataProvider;

/// Read surface over the device/build data source. Production talks to the
/// official JSON feeds; tests substitute an in-memory double.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Devices grouped by OEM for navigation.
    async fn list_oems(&self) -> Result<OemIndex, AppError>;

    /// Resolve a device by codename.
    async fn get_device(&self, model: &str) -> Result<Device, AppError>;

    /// Builds available for a device, newest-first as supplied upstream.
    async fn list_builds(&self, model: &str) -> Result<Vec<Build>, AppError>;
}
