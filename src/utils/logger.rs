use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directive applied when `RUST_LOG` is not set
const DEFAULT_LEVEL: &str = "info";

/// Filter directives: `level` for dependencies, debug for this crate
fn directives(level: &str) -> String {
    let level = level.trim();
    let level = if level.is_empty() { DEFAULT_LEVEL } else { level };
    format!("{},{}=debug", level, env!("CARGO_CRATE_NAME"))
}

fn install(filter: EnvFilter) {
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_line_number(true))
        .try_init();

    if installed.is_err() {
        tracing::debug!("Global subscriber already set, keeping it");
    }
}

/// Initialize logging, honouring `RUST_LOG`
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(DEFAULT_LEVEL)));
    install(filter);
}

/// Initialize logging at `level` (from `--log-level`), ignoring `RUST_LOG`
pub fn init_with_level(level: &str) {
    install(EnvFilter::new(directives(level)));
    tracing::debug!("Logging initialized with level: {}", level);
}
