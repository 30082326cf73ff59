use serde::{Deserialize, Serialize};

/// A component as returned by the remote listing endpoint. Group rows are
/// returned on the same endpoint and must be filtered out by `is_group`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteComponent {
    #[serde(default)]
    pub automation_email: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "group", default)]
    pub is_group: bool,
    #[serde(default)]
    pub group_id: String,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub only_show_if_degraded: bool,
    #[serde(default)]
    pub page_id: String,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub showcase: bool,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub updated_at: String,
}

/// The fields a component request may carry. Server-managed fields
/// (timestamps, position, page ID) are deliberately absent — the API
/// rejects requests that include them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentFields {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "group_id", skip_serializing_if = "String::is_empty")]
    pub group_id: String,
    pub name: String,
    pub only_show_if_degraded: bool,
    pub showcase: bool,
    pub start_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentRequest {
    pub component: ComponentFields,
}

/// The request body for a status-only patch. Deliberately separate from
/// `ComponentFields` — that type's other fields have no sentinel that
/// means "leave unset" (`only_show_if_degraded`/`showcase` are plain
/// `bool`, `name`/`start_date` always serialize), so reusing it for a
/// status-only write would send `name: ""`, `showcase: false`, etc. and
/// clobber whatever the remote component currently holds.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentStatusFields {
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentStatusRequest {
    pub component: ComponentStatusFields,
}

/// A group as returned by the remote listing endpoint. Members are
/// component IDs, not names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteGroup {
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub description: String,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub page_id: String,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentGroupFields {
    pub components: Vec<String>,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// The upstream group-creation/update API expects `description` in two
/// places at once: once at the envelope's top level, once duplicated
/// inside `component_group`. This is not a modeling mistake — see
/// DESIGN.md's open-questions entry on the duplicated group description.
#[derive(Debug, Clone, Serialize)]
pub struct GroupRequest {
    pub description: String,
    pub component_group: ComponentGroupFields,
}

impl GroupRequest {
    pub fn new(name: String, description: String, member_ids: Vec<String>) -> Self {
        GroupRequest {
            description: description.clone(),
            component_group: ComponentGroupFields {
                components: member_ids,
                name,
                description,
            },
        }
    }
}
