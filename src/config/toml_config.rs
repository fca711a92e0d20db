use crate::utils::error::{GenError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub ros: Option<RosConfig>,
    pub scan: Option<ScanConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RosConfig {
    pub distro: Option<String>,
    pub root: Option<PathBuf>,
    pub python_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    pub exclude: Option<Vec<String>>,
    pub skip_hidden: Option<bool>,
    pub include_build_outputs: Option<bool>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex is valid"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| GenError::ConfigParse {
            message: format!("cannot read '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| GenError::ConfigParse {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ROS_DISTRO})，未定義的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn distro(&self) -> Option<&str> {
        self.ros.as_ref().and_then(|r| r.distro.as_deref())
    }

    pub fn ros_root(&self) -> Option<&Path> {
        self.ros.as_ref().and_then(|r| r.root.as_deref())
    }

    pub fn python_dir(&self) -> Option<&str> {
        self.ros.as_ref().and_then(|r| r.python_dir.as_deref())
    }

    pub fn exclude(&self) -> &[String] {
        self.scan
            .as_ref()
            .and_then(|s| s.exclude.as_deref())
            .unwrap_or(&[])
    }

    pub fn skip_hidden(&self) -> Option<bool> {
        self.scan.as_ref().and_then(|s| s.skip_hidden)
    }

    pub fn include_build_outputs(&self) -> Option<bool> {
        self.scan.as_ref().and_then(|s| s.include_build_outputs)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(distro) = self.distro() {
            validation::validate_distro_name("ros.distro", distro)?;
        }
        if let Some(root) = self.ros_root() {
            validation::validate_path("ros.root", root)?;
        }
        if let Some(python_dir) = self.python_dir() {
            validation::validate_dir_name("ros.python_dir", python_dir)?;
        }
        for name in self.exclude() {
            validation::validate_dir_name("scan.exclude", name)?;
        }
        Ok(())
    }
}
