//! # Configuration
//!
//! Settings come from `TENANT_FORGE__*` environment variables, with `__`
//! separating nesting levels, over built-in defaults:
//!
//! ```text
//! TENANT_FORGE__ACTOR_BUFFER_SIZE=64
//! TENANT_FORGE__PROVISIONING__MAX_SLUG_ATTEMPTS=8
//! TENANT_FORGE__PROVISIONING__SUPPORTED_VERTICALS=dental,restaurant,spa
//! ```

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "TENANT_FORGE";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    /// Channel capacity of every resource actor.
    pub actor_buffer_size: usize,
    pub provisioning: ProvisioningConfig,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            actor_buffer_size: 32,
            provisioning: ProvisioningConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProvisioningConfig {
    /// Slug candidates tried before giving up.
    pub max_slug_attempts: usize,
    pub slug_max_length: usize,
    pub slug_suffix_length: usize,
    pub identity_page_size: usize,
    /// Upper bound on identity pages scanned per lookup.
    pub identity_max_pages: usize,
    pub temp_password_length: usize,
    /// Age after which an unfinished provisioning claim may be taken over.
    pub claim_ttl_secs: u64,
    pub supported_verticals: Vec<String>,
    /// Vertical whose defaults apply when a vertical has none of its own.
    pub default_vertical: String,
    pub timezone: String,
    pub locale: String,
    pub currency: String,
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            max_slug_attempts: 5,
            slug_max_length: 48,
            slug_suffix_length: 4,
            identity_page_size: 50,
            identity_max_pages: 20,
            temp_password_length: 16,
            claim_ttl_secs: 900,
            supported_verticals: vec!["dental".into(), "restaurant".into()],
            default_vertical: "dental".into(),
            timezone: "America/Mexico_City".into(),
            locale: "es-MX".into(),
            currency: "MXN".into(),
        }
    }
}

impl ProvisioningConfig {
    pub fn supports_vertical(&self, vertical: &str) -> bool {
        self.supported_verticals.iter().any(|v| v == vertical)
    }
}

impl ForgeConfig {
    /// Loads settings from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_environment(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                env.separator("__")
                    .list_separator(",")
                    .with_list_parse_key("provisioning.supported_verticals")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
