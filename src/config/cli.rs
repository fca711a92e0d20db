use crate::core::{SettingsFragment, SettingsSink};
use crate::utils::error::{GenError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub const STDOUT_HEADER: &str = "# Add the following to your settings.json:";

#[derive(Debug, Clone)]
pub struct StdoutSink {
    header: bool,
}

impl StdoutSink {
    pub fn new(header: bool) -> Self {
        Self { header }
    }

    pub fn render(&self, fragment: &SettingsFragment) -> Result<String> {
        let json = fragment.to_json_pretty()?;
        if self.header {
            Ok(format!("{}\n\n{}\n", STDOUT_HEADER, json))
        } else {
            Ok(format!("{}\n", json))
        }
    }
}

impl SettingsSink for StdoutSink {
    fn write_settings(&self, fragment: &SettingsFragment) -> Result<String> {
        let rendered = self.render(fragment)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;
        Ok("stdout".to_string())
    }
}

/// Merges the fragment into an existing VS Code `settings.json`.
#[derive(Debug, Clone)]
pub struct SettingsFileSink {
    path: PathBuf,
}

impl SettingsFileSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load_existing(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        // VS Code 允許 JSONC（註解、尾逗號），這裡無法保留，視為設定錯誤
        let parsed = serde_json::from_str::<Value>(&content).map_err(|e| {
            GenError::InvalidConfigValue {
                field: "output".to_string(),
                value: self.path.display().to_string(),
                reason: format!("settings file is not plain JSON: {}", e),
            }
        })?;

        match parsed {
            Value::Object(map) => Ok(map),
            _ => Err(GenError::InvalidConfigValue {
                field: "output".to_string(),
                value: self.path.display().to_string(),
                reason: "settings file must contain a JSON object".to_string(),
            }),
        }
    }

    pub fn merge(&self, fragment: &SettingsFragment) -> Result<Map<String, Value>> {
        let mut settings = self.load_existing()?;

        // 既有鍵原地覆寫，新鍵附加在最後
        if let Value::Object(new_keys) = serde_json::to_value(fragment)? {
            for (key, value) in new_keys {
                settings.insert(key, value);
            }
        }

        Ok(settings)
    }
}

impl SettingsSink for SettingsFileSink {
    fn write_settings(&self, fragment: &SettingsFragment) -> Result<String> {
        let settings = self.merge(fragment)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        serde::Serialize::serialize(&settings, &mut ser)?;
        buf.push(b'\n');

        fs::write(&self.path, buf)?;
        tracing::debug!("Merged settings into {}", self.path.display());

        Ok(self.path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ExtraPaths;
    use crate::utils::error::ErrorCategory;
    use std::path::Path;
    use tempfile::TempDir;

    fn fragment(paths: &[&str]) -> SettingsFragment {
        let mut extra = ExtraPaths::new();
        for p in paths {
            extra.push(Path::new(p));
        }
        SettingsFragment::new("noetic", extra)
    }

    #[test]
    fn test_stdout_render_with_and_without_header() {
        let f = fragment(&["/opt/ros/noetic/lib/python3/dist-packages"]);

        let with_header = StdoutSink::new(true).render(&f).unwrap();
        assert!(with_header.starts_with("# Add the following to your settings.json:\n\n{"));

        let raw = StdoutSink::new(false).render(&f).unwrap();
        let parsed: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["ros.distro"], "noetic");
    }

    #[test]
    fn test_file_sink_preserves_other_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".vscode/settings.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            r#"{"editor.tabSize": 2, "ros.distro": "melodic", "files.trimTrailingWhitespace": true}"#,
        )
        .unwrap();

        let sink = SettingsFileSink::new(path.clone());
        sink.write_settings(&fragment(&["/ws/src/a/src"])).unwrap();

        let merged: Map<String, Value> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "editor.tabSize",
                "ros.distro",
                "files.trimTrailingWhitespace",
                "python.autoComplete.extraPaths",
                "python.analysis.extraPaths",
            ]
        );
        assert_eq!(merged["ros.distro"], "noetic");
        assert_eq!(merged["editor.tabSize"], 2);
    }

    #[test]
    fn test_file_sink_creates_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/settings.json");

        let sink = SettingsFileSink::new(path.clone());
        let destination = sink.write_settings(&fragment(&["/ws/src/a/src"])).unwrap();

        assert_eq!(destination, path.display().to_string());
        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["python.analysis.extraPaths"][0], "/ws/src/a/src");
    }

    #[test]
    fn test_file_sink_rejects_non_object() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let result = SettingsFileSink::new(path).write_settings(&fragment(&[]));
        assert!(matches!(result, Err(GenError::InvalidConfigValue { .. })));
    }

    #[test]
    fn test_file_sink_rejects_jsonc_as_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        let original = "{\n    // editor tweaks\n    \"editor.tabSize\": 2,\n}\n";
        fs::write(&path, original).unwrap();

        let err = SettingsFileSink::new(path.clone())
            .write_settings(&fragment(&["/ws/src/a/src"]))
            .unwrap_err();

        assert!(matches!(err, GenError::InvalidConfigValue { ref field, .. } if field == "output"));
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.exit_code(), 1);
        // 原檔不可被覆寫
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }
}
