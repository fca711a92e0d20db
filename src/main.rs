use clap::Parser;
use ros_vscode_paths::core::{ConfigProvider, Pipeline, SettingsSink};
use ros_vscode_paths::utils::{logger, validation::Validate};
use ros_vscode_paths::{
    CliConfig, ExtraPathsPipeline, GenError, GeneratorEngine, RunConfig, SettingsFileSink,
    StdoutSink,
};

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, cli.json_logs);

    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli) {
        tracing::error!(
            "❌ Generation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: &CliConfig) -> Result<(), GenError> {
    let config = RunConfig::from_cli(cli)?;
    config.validate()?;

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        return perform_dry_run(config);
    }

    match &cli.output {
        Some(path) => generate(SettingsFileSink::new(path.clone()), config),
        None => generate(StdoutSink::new(!cli.raw), config),
    }
}

fn generate<S: SettingsSink>(sink: S, config: RunConfig) -> Result<(), GenError> {
    let engine = GeneratorEngine::new(ExtraPathsPipeline::new(sink, config));
    let destination = engine.run()?;
    tracing::info!("✅ Settings written to: {}", destination);
    Ok(())
}

fn perform_dry_run(config: RunConfig) -> Result<(), GenError> {
    println!("📋 Configuration Summary:");
    println!("  Distro: {}", config.ros_distro()?);
    println!("  ROS root: {}", config.ros_root().display());
    println!("  Python dir: {}", config.python_dir());
    println!("  Excluded: {}", config.excluded_dirs().join(", "));
    println!("  Skip hidden: {}", config.skip_hidden());
    println!("  Build outputs: {}", config.include_build_outputs());
    println!();

    let pipeline = ExtraPathsPipeline::new(StdoutSink::new(false), config);
    let report = pipeline.discover()?;

    for workspace in &report.workspaces {
        println!("📂 {}", workspace.root.display());
    }
    for workspace in &report.skipped_workspaces {
        println!("❌ {} (no src directory)", workspace.root.display());
    }

    println!();
    println!("📦 Packages:");
    for package in &report.packages {
        println!("  ✅ {} -> {}", package.name, package.path.display());
    }
    for package in &report.packages_without_src {
        println!("  ⚠️ {} (no src, skipped)", package.name);
    }

    println!();
    println!(
        "✅ Dry run complete: {} packages with a src directory.",
        report.packages.len()
    );
    Ok(())
}
