pub mod build;
pub mod device;

pub use build::{Build, BuildFile, RomView, select_recovery};
pub use device::{Device, OemIndex};
