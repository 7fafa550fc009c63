//! CLI configuration file model.

use devdock_toolbox::HostConfig;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Host settings applied to every demo run.
    pub host: HostConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: CliConfig = serde_yaml::from_str("{}").expect("empty config");
        assert_eq!(config.host.target_url, "about:blank");
        assert_eq!(config.host.event_capacity, 64);
    }

    #[test]
    fn partial_host_section_is_accepted() {
        let yaml = "host:\n  target_url: https://example.com/devtools\n";
        let config: CliConfig = serde_yaml::from_str(yaml).expect("partial config");
        assert_eq!(config.host.target_url, "https://example.com/devtools");
        assert_eq!(config.host.event_capacity, 64);
    }
}
