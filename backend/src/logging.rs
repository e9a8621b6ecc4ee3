//! Logging bootstrap for hosts embedding the goal store.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`, or `default_filter` when
/// that is unset. `log` records from the store are forwarded to it.
///
/// Returns `Ok(false)` if a global subscriber was already installed.
pub fn init_logging(default_filter: &str) -> Result<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .map_err(|e| anyhow::anyhow!("Invalid log filter '{}': {}", default_filter, e))?,
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_tolerated() {
        assert!(init_logging("debug").is_ok());
        assert!(!init_logging("debug").unwrap());
    }
}
