use crate::domain::model::{ScanReport, SettingsFragment};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

pub trait SettingsSink {
    /// Writes the fragment and returns where it went.
    fn write_settings(&self, fragment: &SettingsFragment) -> Result<String>;
}

pub trait ConfigProvider {
    fn workspace_paths(&self) -> &[PathBuf];
    fn ros_distro(&self) -> Result<&str>;
    fn ros_root(&self) -> &Path;
    fn python_dir(&self) -> &str;
    fn excluded_dirs(&self) -> &[String];
    fn skip_hidden(&self) -> bool;
    fn include_build_outputs(&self) -> bool;
}

pub trait Pipeline {
    fn discover(&self) -> Result<ScanReport>;
    fn assemble(&self, report: ScanReport) -> Result<SettingsFragment>;
    fn emit(&self, fragment: SettingsFragment) -> Result<String>;
}
