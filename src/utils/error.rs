use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("ROS_DISTRO environment variable not set")]
    MissingRosDistro,

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigParse { message: String },

    #[error("ROS Python dist-packages directory '{}' does not exist", .path.display())]
    RosPythonPathMissing { path: PathBuf },

    #[error("Failed to scan '{}': {message}", .path.display())]
    Scan { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Environment,
    Configuration,
    FileSystem,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl GenError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GenError::MissingRosDistro | GenError::RosPythonPathMissing { .. } => {
                ErrorCategory::Environment
            }
            GenError::InvalidConfigValue { .. } | GenError::ConfigParse { .. } => {
                ErrorCategory::Configuration
            }
            GenError::Scan { .. } | GenError::Io(_) => ErrorCategory::FileSystem,
            GenError::Serialization(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Environment | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::FileSystem | ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    /// 退出碼：所有錯誤都必須非零
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            GenError::MissingRosDistro => {
                "Please source the appropriate setup.bash file, for example:\n  source /opt/ros/noetic/setup.bash"
                    .to_string()
            }
            GenError::InvalidConfigValue { field, .. } if field == "output" => {
                "Remove comments and trailing commas from the settings file, or print to stdout and paste the fragment"
                    .to_string()
            }
            GenError::InvalidConfigValue { field, .. } => {
                format!("Check the value given for '{}'", field)
            }
            GenError::ConfigParse { .. } => {
                "Make sure the config file exists and is valid TOML".to_string()
            }
            GenError::RosPythonPathMissing { .. } => {
                "Check that ROS is installed for this distro, or pass --ros-root".to_string()
            }
            GenError::Scan { .. } | GenError::Io(_) => {
                "Check that the path exists and is readable".to_string()
            }
            GenError::Serialization(_) => {
                "The settings could not be rendered as JSON; re-run with --verbose".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GenError::MissingRosDistro | GenError::RosPythonPathMissing { .. } => {
                format!("Error: {}.", self)
            }
            _ => format!("Error: {}", self),
        }
    }
}

impl From<walkdir::Error> for GenError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(PathBuf::from).unwrap_or_default();
        GenError::Scan {
            path,
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_exits_non_zero() {
        let errors = vec![
            GenError::MissingRosDistro,
            GenError::ConfigParse {
                message: "bad".to_string(),
            },
            GenError::RosPythonPathMissing {
                path: PathBuf::from("/opt/ros/x/lib/python3/dist-packages"),
            },
            GenError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom")),
        ];

        for e in errors {
            assert_ne!(e.exit_code(), 0, "{:?}", e);
        }
    }

    #[test]
    fn test_missing_distro_suggests_sourcing_setup() {
        let e = GenError::MissingRosDistro;
        assert_eq!(e.category(), ErrorCategory::Environment);
        assert_eq!(e.severity(), ErrorSeverity::High);
        assert!(e.recovery_suggestion().contains("source /opt/ros/noetic/setup.bash"));
    }
}
