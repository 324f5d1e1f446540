use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Environment variable that overrides `logging.filter`.
pub const LOG_ENV_VAR: &str = "TIERGATE_LOG";

/// Install the global subscriber. Returns false if one was already installed,
/// so repeated calls (e.g. from several tests) are harmless.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(config.effective_filter()));
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.effective_json() {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };
    result.is_ok()
}
