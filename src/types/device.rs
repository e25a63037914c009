use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Navigation index: OEM display name to the devices it ships. BTreeMap so
/// repeated renders iterate in a stable order.
pub type OemIndex = BTreeMap<String, Vec<Device>>;

/// One entry of the devices.json feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// Codename, unique across the feed.
    pub model: String,
    pub oem: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineage_recovery: Option<bool>,
}

impl Device {
    /// Devices ship dedicated recovery images unless the flag says otherwise.
    pub fn wants_recovery(&self) -> bool {
        self.lineage_recovery.unwrap_or(true)
    }
}
