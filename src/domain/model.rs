use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

pub const SRC_DIR: &str = "src";
pub const DEVEL_DIR: &str = "devel";
pub const INSTALL_DIR: &str = "install";

/// A catkin/colcon workspace given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub root: PathBuf,
    pub src_root: PathBuf,
    pub devel_root: PathBuf,
    pub install_root: PathBuf,
}

impl Workspace {
    pub fn new(path: &Path) -> std::io::Result<Self> {
        let root = absolute_path(path)?;
        Ok(Self {
            src_root: root.join(SRC_DIR),
            devel_root: root.join(DEVEL_DIR),
            install_root: root.join(INSTALL_DIR),
            root,
        })
    }

    pub fn has_sources(&self) -> bool {
        self.src_root.is_dir()
    }

    /// Existing `lib/<python_dir>/dist-packages` dirs under the devel and install spaces.
    pub fn build_output_python_paths(&self, python_dir: &str) -> Vec<PathBuf> {
        [&self.devel_root, &self.install_root]
            .into_iter()
            .map(|base| dist_packages_dir(base, python_dir))
            .filter(|p| p.is_dir())
            .collect()
    }
}

/// `<base>/lib/<python_dir>/dist-packages`
pub fn dist_packages_dir(base: &Path, python_dir: &str) -> PathBuf {
    base.join("lib").join(python_dir).join("dist-packages")
}

/// Lexical absolutisation: joins onto the cwd and folds `.`/`..`, never touches symlinks.
pub(crate) fn absolute_path(path: &Path) -> std::io::Result<PathBuf> {
    let joined = std::path::absolute(path)?;

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::ParentDir => {
                normalized.pop();
            }
            Component::CurDir => {}
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub path: PathBuf,
    pub name: String,
    pub src_dir: Option<PathBuf>,
}

impl Package {
    pub fn from_dir(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let candidate = path.join(SRC_DIR);
        let src_dir = candidate.is_dir().then_some(candidate);

        Self {
            path: path.to_path_buf(),
            name,
            src_dir,
        }
    }
}

/// Result of walking every workspace.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub workspaces: Vec<Workspace>,
    /// Packages with a `src/` directory, in discovery order.
    pub packages: Vec<Package>,
    pub packages_without_src: Vec<Package>,
    pub skipped_workspaces: Vec<Workspace>,
}

impl ScanReport {
    pub fn src_dirs(&self) -> impl Iterator<Item = &Path> {
        self.packages.iter().filter_map(|p| p.src_dir.as_deref())
    }
}

/// Insertion-ordered, value-deduplicated list of search paths.
#[derive(Debug, Clone, Default)]
pub struct ExtraPaths {
    paths: IndexSet<String>,
}

impl ExtraPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the path was already present or is not valid UTF-8.
    pub fn push(&mut self, path: &Path) -> bool {
        match path.to_str() {
            Some(s) => self.paths.insert(s.to_string()),
            None => {
                // 有損轉換會產生指向不存在位置的路徑
                tracing::warn!(
                    "⚠️ Skipping non UTF-8 path '{}': it cannot be written to settings.json",
                    path.display()
                );
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.paths.into_iter().collect()
    }
}

/// The `settings.json` fragment. Field order is the emitted key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsFragment {
    #[serde(rename = "python.autoComplete.extraPaths")]
    pub auto_complete_extra_paths: Vec<String>,
    #[serde(rename = "python.analysis.extraPaths")]
    pub analysis_extra_paths: Vec<String>,
    #[serde(rename = "ros.distro")]
    pub ros_distro: String,
}

impl SettingsFragment {
    pub fn new(ros_distro: impl Into<String>, extra_paths: ExtraPaths) -> Self {
        let paths = extra_paths.into_vec();
        Self {
            auto_complete_extra_paths: paths.clone(),
            analysis_extra_paths: paths,
            ros_distro: ros_distro.into(),
        }
    }

    /// Pretty JSON with 4-space indentation.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json 只會輸出合法 UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
