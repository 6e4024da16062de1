use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Looked up in the working directory, `.toml` optional.
pub const CONFIG_FILE: &str = "simconnect-probe";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Name the client registers with on the host
    pub client_name: String,
    /// `SimConnect.cfg` entry to connect through, 0 is the local sim
    pub config_index: u32,
    pub poll_interval_ms: u64,
    /// Default tracing filter, `RUST_LOG` wins over it
    pub log_level: String,
    /// Request the user aircraft's simulation time every poll
    pub request_sim_data: bool,
}

impl Config {
    /// Load configuration from `simconnect-probe.toml` if present, then from
    /// environment variables with the SIMPROBE_ prefix.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    pub fn load_from(path: &str) -> Result<Self, config::ConfigError> {
        let settings = Self::defaults()?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("SIMPROBE"))
            .build()?;

        settings.try_deserialize()
    }

    fn defaults(
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        config::Config::builder()
            .set_default("client_name", "simconnect-test")?
            .set_default("config_index", 0_i64)?
            .set_default("poll_interval_ms", 10_i64)?
            .set_default("log_level", "info")?
            .set_default("request_sim_data", false)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn from_toml(toml: &str) -> Config {
        Config::defaults()
            .unwrap()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = from_toml("");
        assert_eq!("simconnect-test", config.client_name);
        assert_eq!(0, config.config_index);
        assert_eq!(Duration::from_millis(10), config.poll_interval());
        assert_eq!("info", config.log_level);
        assert!(!config.request_sim_data);
    }

    #[test]
    fn test_overrides() {
        let config = from_toml(
            r#"
            client_name = "probe"
            poll_interval_ms = 250
            request_sim_data = true
            "#,
        );
        assert_eq!("probe", config.client_name);
        assert_eq!(Duration::from_millis(250), config.poll_interval());
        assert!(config.request_sim_data);
        assert_eq!("info", config.log_level);
    }

    #[test]
    fn test_missing_file_is_fine() {
        let config = Config::load_from("no/such/simconnect-probe").unwrap();
        assert!(!config.client_name.is_empty());
    }
}
