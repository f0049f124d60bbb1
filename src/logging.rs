//! Logging initialization utilities.

use env_logger::Env;

/// Initialize logging with a default filter level.
///
/// `RUST_LOG` overrides the default; set it to `fluent_rest=debug` to see
/// every exchange. Returns `false` if a logger was already installed.
pub fn init() -> bool {
    init_with_default("info")
}

/// Initialize logging with the given default filter.
pub fn init_with_default(filter: &str) -> bool {
    let env = Env::default().default_filter_or(filter);
    env_logger::Builder::from_env(env).try_init().is_ok()
}
