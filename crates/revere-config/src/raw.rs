use serde::Deserialize;

use revere_domain::{Component, ComponentGroup, ServiceToComponentMapping};

/// The document shape as written in `revere.yaml`. Every field is optional
/// at this layer — required-ness and numeric defaults are applied when
/// converting to `Config`, not expressed here, since some defaults (API
/// root, port) are strings/numbers `serde(default)` can't express without
/// duplicating the literal in two places.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub client: RawClient,
    #[serde(default)]
    pub statuspage: RawStatuspage,
    #[serde(default)]
    pub pubsub: RawPubsub,
    #[serde(default)]
    pub api: RawApi,
    #[serde(default)]
    pub service_to_component_mapping: Vec<ServiceToComponentMapping>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClient {
    pub redirects: Option<u32>,
    pub retries: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStatuspage {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub page_id: String,
    pub api_root: Option<String>,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub groups: Vec<ComponentGroup>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPubsub {
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub subscription_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawApi {
    pub port: Option<u16>,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub silent: bool,
}
