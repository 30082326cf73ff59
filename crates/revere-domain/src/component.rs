use serde::{Deserialize, Serialize};

/// A declared component, as written in the configuration file. Read-only
/// once loaded; the reconciler merges this over whatever is on the remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub only_show_if_degraded: bool,
    /// Inverted into the remote `showcase` flag on merge.
    #[serde(default)]
    pub hide_uptime: bool,
    pub start_date: String,
}

/// A declared component group. Membership is by component name; the
/// reconciler resolves names to remote IDs before comparing against the
/// remote group's `components` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentGroup {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub members: Vec<String>,
}

/// Routes alerts for a `(service, environment)` pair to the named components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceToComponentMapping {
    pub service_name: String,
    pub service_environment: String,
    pub affects_components_named: Vec<String>,
}
