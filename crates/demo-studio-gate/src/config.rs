//! Configuration for the workflow gate

use serde::{Deserialize, Serialize};

/// Gate configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Share link configuration
    #[serde(default)]
    pub links: LinkConfig,
}

/// Share link configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Base URL all share links are built under
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://demo.yourdomain".to_string()
}

impl StudioConfig {
    /// Load configuration from defaults, an optional file, then the environment.
    ///
    /// Environment variables use the `DEMO_STUDIO_` prefix with `__` between
    /// nested keys, e.g. `DEMO_STUDIO_LINKS__BASE_URL`.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        // Add default configuration
        builder = builder.add_source(config::Config::try_from(&StudioConfig::default())?);

        // Add file configuration if provided
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        // Add environment variables with DEMO_STUDIO_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("DEMO_STUDIO")
                .prefix_separator("_")
                .separator("__"),
        );

        builder.build()?.try_deserialize()
    }
}
