use std::collections::HashSet;

use revere_domain::{Component, ComponentGroup, ServiceToComponentMapping};

use crate::error::ConfigError;
use crate::raw::RawConfig;

const DEFAULT_REDIRECTS: u32 = 3;
const DEFAULT_RETRIES: u32 = 3;
const DEFAULT_API_ROOT: &str = "https://api.statuspage.io/v1";
const DEFAULT_API_PORT: u16 = 8080;

const STATUSPAGE_APIKEY_ENV: &str = "REVERE_STATUSPAGE_APIKEY";
const API_PORT_ENV: &str = "REVERE_API_PORT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub redirects: u32,
    pub retries: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatuspageConfig {
    pub api_key: String,
    pub page_id: String,
    pub api_root: String,
    pub components: Vec<Component>,
    pub groups: Vec<ComponentGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PubsubConfig {
    pub project_id: String,
    pub subscription_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub port: u16,
    pub debug: bool,
    pub silent: bool,
}

/// The fully defaulted, environment-overridden, and validated configuration.
/// Immutable once built — nothing downstream mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub verbose: bool,
    pub client: ClientConfig,
    pub statuspage: StatuspageConfig,
    pub pubsub: PubsubConfig,
    pub api: ApiConfig,
    pub service_to_component_mapping: Vec<ServiceToComponentMapping>,
}

impl Config {
    /// Applies defaults and environment overrides to a parsed document,
    /// then runs secondary validation. `verbose_flag` is the CLI's
    /// `--verbose`, folded over the file's own `verbose` with OR semantics.
    pub fn assemble(raw: RawConfig, verbose_flag: bool) -> Result<Config, ConfigError> {
        Self::assemble_with_env(raw, verbose_flag, |name| std::env::var(name).ok())
    }

    pub(crate) fn assemble_with_env(
        raw: RawConfig,
        verbose_flag: bool,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Config, ConfigError> {
        let mut api_key = raw.statuspage.api_key;
        if let Some(value) = env(STATUSPAGE_APIKEY_ENV) {
            api_key = value;
        }
        if api_key.is_empty() {
            return Err(ConfigError::Missing("statuspage.apiKey"));
        }

        if raw.statuspage.page_id.is_empty() {
            return Err(ConfigError::Missing("statuspage.pageID"));
        }
        if raw.pubsub.project_id.is_empty() {
            return Err(ConfigError::Missing("pubsub.projectID"));
        }
        if raw.pubsub.subscription_id.is_empty() {
            return Err(ConfigError::Missing("pubsub.subscriptionID"));
        }

        let mut port = raw.api.port.unwrap_or(DEFAULT_API_PORT);
        if let Some(value) = env(API_PORT_ENV) {
            port = value.parse().map_err(|_| ConfigError::BadEnvVar {
                name: API_PORT_ENV,
                expected: "u16",
                value,
            })?;
        }

        let config = Config {
            verbose: raw.verbose || verbose_flag,
            client: ClientConfig {
                redirects: raw.client.redirects.unwrap_or(DEFAULT_REDIRECTS),
                retries: raw.client.retries.unwrap_or(DEFAULT_RETRIES),
            },
            statuspage: StatuspageConfig {
                api_key,
                page_id: raw.statuspage.page_id,
                api_root: raw.statuspage.api_root.unwrap_or_else(|| DEFAULT_API_ROOT.to_string()),
                components: raw.statuspage.components,
                groups: raw.statuspage.groups,
            },
            pubsub: PubsubConfig {
                project_id: raw.pubsub.project_id,
                subscription_id: raw.pubsub.subscription_id,
            },
            api: ApiConfig {
                port,
                debug: raw.api.debug,
                silent: raw.api.silent,
            },
            service_to_component_mapping: raw.service_to_component_mapping,
        };

        validate_mapping(&config)?;
        Ok(config)
    }
}

fn validate_mapping(config: &Config) -> Result<(), ConfigError> {
    let declared: HashSet<&str> = config
        .statuspage
        .components
        .iter()
        .map(|c| c.name.as_str())
        .collect();

    for mapping in &config.service_to_component_mapping {
        for name in &mapping.affects_components_named {
            if !declared.contains(name.as_str()) {
                return Err(ConfigError::UnknownComponentInMapping {
                    service: mapping.service_name.clone(),
                    environment: mapping.service_environment.clone(),
                    component: name.clone(),
                });
            }
        }
    }
    Ok(())
}
