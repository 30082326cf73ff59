use std::collections::HashMap;

use revere_domain::ComponentGroup;
use revere_statuspage::{ComponentGroupFields, RemoteGroup, StatusPage};
use tracing::info;

use crate::error::ReconcileError;
use crate::report::ReconcileReport;

fn index_components_by_name(remote_names: Vec<(String, String)>) -> HashMap<String, String> {
    let mut map: HashMap<String, String> = HashMap::new();
    for (name, id) in remote_names {
        match map.get(&name) {
            Some(existing) if *existing >= id => {}
            _ => {
                map.insert(name, id);
            }
        }
    }
    map
}

fn index_groups_by_name(groups: Vec<RemoteGroup>) -> HashMap<String, RemoteGroup> {
    let mut map: HashMap<String, RemoteGroup> = HashMap::new();
    for group in groups {
        match map.get(&group.name) {
            Some(existing) if existing.id >= group.id => {}
            _ => {
                map.insert(group.name.clone(), group);
            }
        }
    }
    map
}

fn resolve_member_ids(
    group_name: &str,
    members: &[String],
    component_name_to_id: &HashMap<String, String>,
) -> Result<Vec<String>, ReconcileError> {
    let mut ids = Vec::with_capacity(members.len());
    for member in members {
        let id = component_name_to_id.get(member).ok_or_else(|| {
            ReconcileError::UnknownComponentInGroup {
                group: group_name.to_string(),
                member: member.clone(),
            }
        })?;
        ids.push(id.clone());
    }
    Ok(ids)
}

/// Brings the remote page's component groups into agreement with
/// `declared`, the same way `reconcile_components` does for components.
/// Member lists are names in configuration but IDs on the remote; both
/// sides are sorted before comparison so membership-order differences
/// never spuriously mark a group as modified.
pub async fn reconcile_groups(
    page_id: &str,
    declared: &[ComponentGroup],
    client: &dyn StatusPage,
) -> Result<ReconcileReport, ReconcileError> {
    let remote_components = client.list_components(page_id).await?;
    let component_name_to_id = index_components_by_name(
        remote_components.into_iter().map(|c| (c.name, c.id)).collect(),
    );

    let remote = index_groups_by_name(client.list_groups(page_id).await?);
    let declared_by_name: HashMap<&str, &ComponentGroup> =
        declared.iter().map(|g| (g.name.as_str(), g)).collect();

    let mut report = ReconcileReport::new();

    let mut to_delete: Vec<&RemoteGroup> = remote
        .values()
        .filter(|r| !declared_by_name.contains_key(r.name.as_str()))
        .collect();
    to_delete.sort_by(|a, b| a.name.cmp(&b.name));
    for group in to_delete {
        info!(group = %group.name, "deleting group from status page");
        client.delete_group(page_id, &group.id).await?;
        report.deleted.push(group.name.clone());
    }

    let mut to_create: Vec<&ComponentGroup> = declared
        .iter()
        .filter(|g| !remote.contains_key(&g.name))
        .collect();
    to_create.sort_by(|a, b| a.name.cmp(&b.name));
    for group in to_create {
        info!(group = %group.name, "creating group on status page");
        let mut member_ids = resolve_member_ids(&group.name, &group.members, &component_name_to_id)?;
        member_ids.sort();
        client
            .create_group(
                page_id,
                ComponentGroupFields {
                    components: member_ids,
                    name: group.name.clone(),
                    description: group.description.clone(),
                },
            )
            .await?;
        report.created.push(group.name.clone());
    }

    let mut to_modify: Vec<(String, String, ComponentGroupFields)> = Vec::new();
    for (name, remote_group) in &remote {
        if let Some(declared_group) = declared_by_name.get(name.as_str()) {
            let mut member_ids =
                resolve_member_ids(name, &declared_group.members, &component_name_to_id)?;
            member_ids.sort();
            let mut remote_members = remote_group.components.clone();
            remote_members.sort();

            let changed = remote_members != member_ids
                || remote_group.description != declared_group.description
                || remote_group.name != declared_group.name;
            if changed {
                to_modify.push((
                    name.clone(),
                    remote_group.id.clone(),
                    ComponentGroupFields {
                        components: member_ids,
                        name: declared_group.name.clone(),
                        description: declared_group.description.clone(),
                    },
                ));
            }
        }
    }
    to_modify.sort_by(|a, b| a.0.cmp(&b.0));
    for (name, id, fields) in to_modify {
        info!(group = %name, "modifying group on status page");
        client.patch_group(page_id, &id, fields).await?;
        report.modified.push(name);
    }

    Ok(report)
}
