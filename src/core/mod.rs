pub mod engine;
pub mod scanner;

pub use crate::domain::model::{ExtraPaths, Package, ScanReport, SettingsFragment, Workspace};
pub use crate::domain::ports::{ConfigProvider, Pipeline, SettingsSink};
pub use crate::utils::error::Result;
