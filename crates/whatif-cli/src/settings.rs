//! Configuration loading and logging setup

use anyhow::Context;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use whatif_engine::EngineConfig;

/// Load engine configuration, falling back to defaults without a path
///
/// # Errors
/// Fails if the file cannot be read, is not valid TOML, or describes an
/// inconsistent configuration.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: EngineConfig =
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("validating config {}", path.display()))?;

    tracing::debug!("Loaded config from {}: {:?}", path.display(), config);
    Ok(config)
}

/// Default filter directive for a `-v` count
#[must_use]
pub fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber, logging to stderr
///
/// `RUST_LOG` takes precedence over the verbosity flag.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_filter(verbose)));

    // A second init in the same process keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_path() {
        assert_eq!(load_config(None).unwrap(), EngineConfig::default());
    }

    #[test]
    fn loads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "medium_threshold = 3\nhigh_threshold = 10").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.medium_threshold, 3);
        assert_eq!(config.high_threshold, 10);
        assert_eq!(config.sickness_days, 3);
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "medium_threshold = 30\nhigh_threshold = 10").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(format!("{err:#}").contains("exceeds high threshold"));
    }

    #[test]
    fn missing_file_has_context() {
        let err = load_config(Some(Path::new("/nonexistent/whatif.toml"))).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(verbosity_filter(0), "warn");
        assert_eq!(verbosity_filter(1), "info");
        assert_eq!(verbosity_filter(5), "debug");
    }
}
