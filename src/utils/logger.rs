use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATE_TARGET: &str = "ros_vscode_paths";

/// `RUST_LOG` wins; otherwise this crate logs at info, or debug when verbose.
fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{}={},warn", CRATE_TARGET, level))
    })
}

/// stdout 只輸出 settings 片段，日誌一律寫到 stderr
pub fn init_cli_logger(verbose: bool, json: bool) {
    let compact = (!json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .compact()
    });
    let json_lines = json.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
    });

    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(compact)
        .with(json_lines)
        .init();
}
