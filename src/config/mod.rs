pub mod cli;
pub mod toml_config;

use crate::core::scanner::DEFAULT_EXCLUDED_DIRS;
use crate::core::ConfigProvider;
use crate::utils::error::{GenError, Result};
use crate::utils::validation::{self, Validate};
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

pub const DEFAULT_ROS_ROOT: &str = "/opt/ros";
pub const DEFAULT_PYTHON_DIR: &str = "python3";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "ros-vscode-paths")]
#[command(
    about = "Generate VSCode settings.json extraPaths for multiple ROS workspaces",
    version
)]
pub struct CliConfig {
    /// Path(s) to ROS workspace(s) (e.g., /home/user/catkin_ws)
    #[arg(value_name = "WORKSPACE_PATH", required = true, num_args = 1..)]
    pub workspace_paths: Vec<PathBuf>,

    /// ROS distro; normally taken from the sourced setup.bash
    #[arg(long, env = "ROS_DISTRO")]
    pub distro: Option<String>,

    /// ROS install prefix [default: /opt/ros]
    #[arg(long)]
    pub ros_root: Option<PathBuf>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Extra directory names to skip while scanning
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Also scan directories whose name starts with '.'
    #[arg(long)]
    pub include_hidden: bool,

    /// Add the workspaces' devel/install python paths
    #[arg(long)]
    pub include_build_outputs: bool,

    /// Merge the result into this settings.json instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print only the JSON, without the header line
    #[arg(long)]
    pub raw: bool,

    /// Show what would be generated without emitting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Effective settings after merging CLI/env, the TOML file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub workspace_paths: Vec<PathBuf>,
    pub ros_distro: Option<String>,
    pub ros_root: PathBuf,
    pub python_dir: String,
    pub excluded_dirs: Vec<String>,
    pub skip_hidden: bool,
    pub include_build_outputs: bool,
}

impl RunConfig {
    pub fn new(workspace_paths: Vec<PathBuf>) -> Self {
        Self {
            workspace_paths,
            ros_distro: None,
            ros_root: PathBuf::from(DEFAULT_ROS_ROOT),
            python_dir: DEFAULT_PYTHON_DIR.to_string(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            skip_hidden: true,
            include_build_outputs: false,
        }
    }

    pub fn with_distro(mut self, distro: impl Into<String>) -> Self {
        self.ros_distro = Some(distro.into());
        self
    }

    pub fn with_ros_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.ros_root = root.into();
        self
    }

    pub fn add_excluded_dirs<'a>(&mut self, names: impl IntoIterator<Item = &'a String>) {
        for name in names {
            if !self.excluded_dirs.contains(name) {
                self.excluded_dirs.push(name.clone());
            }
        }
    }

    /// 套用 TOML 中有設定的值；CLI 覆寫需在之後進行
    pub fn apply_toml(&mut self, toml: &TomlConfig) {
        if let Some(distro) = toml.distro() {
            self.ros_distro = Some(distro.to_string());
        }
        if let Some(root) = toml.ros_root() {
            self.ros_root = root.to_path_buf();
        }
        if let Some(python_dir) = toml.python_dir() {
            self.python_dir = python_dir.to_string();
        }
        self.add_excluded_dirs(toml.exclude());
        if let Some(skip_hidden) = toml.skip_hidden() {
            self.skip_hidden = skip_hidden;
        }
        if let Some(include) = toml.include_build_outputs() {
            self.include_build_outputs = include;
        }
    }

    /// CLI/env > TOML file > defaults.
    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let mut config = Self::new(cli.workspace_paths.clone());

        if let Some(path) = &cli.config {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            let toml = TomlConfig::from_file(path)?;
            toml.validate()?;
            config.apply_toml(&toml);
        }

        if let Some(distro) = cli.distro.as_deref().filter(|d| !d.is_empty()) {
            config.ros_distro = Some(distro.to_string());
        }
        if let Some(root) = &cli.ros_root {
            config.ros_root = root.clone();
        }
        config.add_excluded_dirs(&cli.exclude);
        if cli.include_hidden {
            config.skip_hidden = false;
        }
        if cli.include_build_outputs {
            config.include_build_outputs = true;
        }

        Ok(config)
    }
}

impl ConfigProvider for RunConfig {
    fn workspace_paths(&self) -> &[PathBuf] {
        &self.workspace_paths
    }

    fn ros_distro(&self) -> Result<&str> {
        self.ros_distro.as_deref().ok_or(GenError::MissingRosDistro)
    }

    fn ros_root(&self) -> &Path {
        &self.ros_root
    }

    fn python_dir(&self) -> &str {
        &self.python_dir
    }

    fn excluded_dirs(&self) -> &[String] {
        &self.excluded_dirs
    }

    fn skip_hidden(&self) -> bool {
        self.skip_hidden
    }

    fn include_build_outputs(&self) -> bool {
        self.include_build_outputs
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        let distro = self.ros_distro()?;
        validation::validate_distro_name("distro", distro)?;

        if self.workspace_paths.is_empty() {
            return Err(GenError::InvalidConfigValue {
                field: "workspace_paths".to_string(),
                value: String::new(),
                reason: "At least one workspace path is required".to_string(),
            });
        }
        for path in &self.workspace_paths {
            validation::validate_path("workspace_paths", path)?;
        }

        validation::validate_path("ros_root", &self.ros_root)?;
        validation::validate_dir_name("python_dir", &self.python_dir)?;
        for name in &self.excluded_dirs {
            validation::validate_dir_name("exclude", name)?;
        }

        Ok(())
    }
}
