use crate::core::scanner::PackageScanner;
use crate::core::{
    ConfigProvider, ExtraPaths, Pipeline, Result, ScanReport, SettingsFragment, SettingsSink,
    Workspace,
};
use crate::domain::model::{absolute_path, dist_packages_dir};
use crate::utils::error::GenError;
use std::path::PathBuf;

pub struct ExtraPathsPipeline<S: SettingsSink, C: ConfigProvider> {
    pub(crate) sink: S,
    pub(crate) config: C,
    scanner: PackageScanner,
}

impl<S: SettingsSink, C: ConfigProvider> ExtraPathsPipeline<S, C> {
    pub fn new(sink: S, config: C) -> Self {
        let scanner = PackageScanner::new(
            config.excluded_dirs().iter().cloned(),
            config.skip_hidden(),
        );
        Self {
            sink,
            config,
            scanner,
        }
    }

    /// `<ros_root>/<distro>/lib/<python_dir>/dist-packages`, which must exist.
    pub fn ros_python_path(&self) -> Result<PathBuf> {
        let distro = self.config.ros_distro()?;
        // 相對路徑會被 VS Code 以工作區資料夾解析，必須先轉成絕對路徑
        let ros_root = absolute_path(self.config.ros_root())?;
        let path = dist_packages_dir(&ros_root.join(distro), self.config.python_dir());

        if !path.is_dir() {
            return Err(GenError::RosPythonPathMissing { path });
        }
        Ok(path)
    }
}

impl<S: SettingsSink, C: ConfigProvider> Pipeline for ExtraPathsPipeline<S, C> {
    fn discover(&self) -> Result<ScanReport> {
        // 先確認 ROS 環境，避免白白掃描
        self.ros_python_path()?;

        let mut report = ScanReport::default();

        for path in self.config.workspace_paths() {
            let workspace = Workspace::new(path)?;
            tracing::info!("📂 Processing Workspace: '{}'", workspace.root.display());
            tracing::info!("Source Directory: '{}'", workspace.src_root.display());

            if !workspace.has_sources() {
                tracing::error!(
                    "❌ Source directory '{}' does not exist. Skipping workspace.",
                    workspace.src_root.display()
                );
                report.skipped_workspaces.push(workspace);
                continue;
            }

            for package in self.scanner.scan(&workspace.src_root)? {
                match &package.src_dir {
                    Some(src) => {
                        tracing::info!("✅ Added src directory: '{}'", src.display());
                        report.packages.push(package);
                    }
                    None => {
                        tracing::warn!(
                            "⚠️ 'src' not found in package '{}'. Skipping.",
                            package.name
                        );
                        report.packages_without_src.push(package);
                    }
                }
            }

            report.workspaces.push(workspace);
        }

        Ok(report)
    }

    fn assemble(&self, report: ScanReport) -> Result<SettingsFragment> {
        let distro = self.config.ros_distro()?;
        let ros_python_path = self.ros_python_path()?;

        let mut extra_paths = ExtraPaths::new();
        extra_paths.push(&ros_python_path);

        let mut package_paths = 0;
        for src in report.src_dirs() {
            if extra_paths.push(src) {
                package_paths += 1;
            } else {
                tracing::debug!("Duplicate src directory ignored: '{}'", src.display());
            }
        }

        if self.config.include_build_outputs() {
            for workspace in &report.workspaces {
                for path in workspace.build_output_python_paths(self.config.python_dir()) {
                    tracing::info!("🔧 Added build output: '{}'", path.display());
                    extra_paths.push(&path);
                }
            }
        }

        if package_paths == 0 {
            tracing::warn!("⚠️ No valid Python ROS package src directories found.");
        } else {
            tracing::info!("📊 Total src directories added: {}", package_paths);
        }

        Ok(SettingsFragment::new(distro, extra_paths))
    }

    fn emit(&self, fragment: SettingsFragment) -> Result<String> {
        self.sink.write_settings(&fragment)
    }
}
