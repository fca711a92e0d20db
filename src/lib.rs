pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::pipelines::extra_paths_pipeline::ExtraPathsPipeline;
pub use config::cli::{SettingsFileSink, StdoutSink};
pub use config::{toml_config::TomlConfig, RunConfig};
pub use core::{engine::GeneratorEngine, scanner::PackageScanner};
pub use utils::error::{GenError, Result};
