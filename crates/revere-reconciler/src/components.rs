use std::collections::HashMap;

use revere_domain::Component;
use revere_statuspage::{ComponentFields, RemoteComponent, StatusPage};
use tracing::info;

use crate::error::ReconcileError;
use crate::report::ReconcileReport;

/// Two records are the same remote entity iff these seven fields match.
/// Hand-coded rather than derived `PartialEq` on the whole struct so that
/// server-managed fields (timestamps, position, page ID) never leak into
/// the comparison, and so that adding a field to `RemoteComponent` can't
/// silently change reconciliation behavior without this function changing
/// too.
fn fields_equal(a: &RemoteComponent, b: &RemoteComponent) -> bool {
    a.name == b.name
        && a.description == b.description
        && a.only_show_if_degraded == b.only_show_if_degraded
        && a.showcase == b.showcase
        && a.start_date == b.start_date
        && a.status == b.status
        && a.group_id == b.group_id
}

fn merge_declared_over_remote(declared: &Component, remote: &RemoteComponent) -> RemoteComponent {
    let mut merged = remote.clone();
    merged.name = declared.name.clone();
    merged.description = declared.description.clone();
    merged.only_show_if_degraded = declared.only_show_if_degraded;
    merged.start_date = declared.start_date.clone();
    merged.showcase = !declared.hide_uptime;
    // Status is deliberately not merged: reconciliation must never clobber
    // a component's live status.
    merged
}

fn to_fields(remote: &RemoteComponent) -> ComponentFields {
    ComponentFields {
        description: remote.description.clone(),
        group_id: remote.group_id.clone(),
        name: remote.name.clone(),
        only_show_if_degraded: remote.only_show_if_degraded,
        showcase: remote.showcase,
        start_date: remote.start_date.clone(),
        status: remote.status.clone(),
    }
}

/// Name-indexed view of a remote listing. Duplicate names keep the
/// lexicographically greatest ID — an arbitrary but stable tie-breaker so
/// that repeated runs against ambiguous remote state still converge.
fn index_by_name(components: Vec<RemoteComponent>) -> HashMap<String, RemoteComponent> {
    let mut map: HashMap<String, RemoteComponent> = HashMap::new();
    for component in components {
        match map.get(&component.name) {
            Some(existing) if existing.id >= component.id => {}
            _ => {
                map.insert(component.name.clone(), component);
            }
        }
    }
    map
}

/// Brings the remote page's components into agreement with `declared`:
/// deletes remote components absent from `declared`, creates declared
/// components absent remotely, and patches declared components whose
/// merged record differs from the current remote one. Applied in that
/// fixed order; on the first error, returns it — already-applied changes
/// stay applied, since a later run recomputes the diff from scratch.
pub async fn reconcile_components(
    page_id: &str,
    declared: &[Component],
    client: &dyn StatusPage,
) -> Result<ReconcileReport, ReconcileError> {
    let remote = index_by_name(client.list_components(page_id).await?);
    let declared_by_name: HashMap<&str, &Component> =
        declared.iter().map(|c| (c.name.as_str(), c)).collect();

    let mut report = ReconcileReport::new();

    let mut to_delete: Vec<&RemoteComponent> = remote
        .values()
        .filter(|r| !declared_by_name.contains_key(r.name.as_str()))
        .collect();
    to_delete.sort_by(|a, b| a.name.cmp(&b.name));
    for component in to_delete {
        info!(component = %component.name, "deleting component from status page");
        client.delete_component(page_id, &component.id).await?;
        report.deleted.push(component.name.clone());
    }

    let mut to_create: Vec<&Component> = declared
        .iter()
        .filter(|c| !remote.contains_key(&c.name))
        .collect();
    to_create.sort_by(|a, b| a.name.cmp(&b.name));
    for component in to_create {
        info!(component = %component.name, "creating component on status page");
        let mut fields = ComponentFields {
            description: component.description.clone(),
            group_id: String::new(),
            name: component.name.clone(),
            only_show_if_degraded: component.only_show_if_degraded,
            showcase: !component.hide_uptime,
            start_date: component.start_date.clone(),
            status: String::new(),
        };
        // New components always start operational; configuration must
        // never be able to dictate a component's initial live status.
        fields.status = "operational".to_string();
        client.create_component(page_id, fields).await?;
        report.created.push(component.name.clone());
    }

    let mut to_modify: Vec<(String, String, ComponentFields)> = Vec::new();
    for (name, remote_component) in &remote {
        if let Some(declared_component) = declared_by_name.get(name.as_str()) {
            let merged = merge_declared_over_remote(declared_component, remote_component);
            if !fields_equal(remote_component, &merged) {
                to_modify.push((name.clone(), remote_component.id.clone(), to_fields(&merged)));
            }
        }
    }
    to_modify.sort_by(|a, b| a.0.cmp(&b.0));
    for (name, id, fields) in to_modify {
        info!(component = %name, "modifying component on status page");
        client.patch_component(page_id, &id, fields).await?;
        report.modified.push(name);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use revere_statuspage::InMemoryStatusPage;

    fn component(name: &str) -> Component {
        Component {
            name: name.to_string(),
            description: String::new(),
            only_show_if_degraded: false,
            hide_uptime: false,
            start_date: "2024-01-01".to_string(),
        }
    }

    fn remote(id: &str, name: &str) -> RemoteComponent {
        RemoteComponent {
            automation_email: String::new(),
            created_at: String::new(),
            description: String::new(),
            is_group: false,
            group_id: String::new(),
            id: id.to_string(),
            name: name.to_string(),
            only_show_if_degraded: false,
            page_id: "p1".to_string(),
            position: 0,
            showcase: true,
            start_date: "2024-01-01".to_string(),
            status: "operational".to_string(),
            updated_at: String::new(),
        }
    }

    #[tokio::test]
    async fn creates_and_deletes_in_order_and_leaves_identical_alone() {
        let page = InMemoryStatusPage::new();
        page.seed_component(remote("id-1", "Same")).await;
        page.seed_component(remote("id-2", "Old")).await;

        let declared = vec![component("Same"), component("New")];
        let report = reconcile_components("p1", &declared, &page).await.unwrap();

        assert_eq!(report.deleted, vec!["Old".to_string()]);
        assert_eq!(report.created, vec!["New".to_string()]);
        assert!(report.modified.is_empty());

        let remaining = page.list_components("p1").await.unwrap();
        let names: Vec<_> = remaining.iter().map(|c| c.name.as_str()).collect();
        assert!(names.contains(&"Same"));
        assert!(names.contains(&"New"));
        assert!(!names.contains(&"Old"));
    }

    #[tokio::test]
    async fn modifies_only_when_fields_differ_and_is_idempotent() {
        let page = InMemoryStatusPage::new();
        let mut x = remote("id-1", "X");
        x.description = "old".to_string();
        x.showcase = true;
        page.seed_component(x).await;

        let mut declared = component("X");
        declared.description = "new".to_string();
        declared.hide_uptime = false;

        let report = reconcile_components("p1", &[declared.clone()], &page)
            .await
            .unwrap();
        assert_eq!(report.modified, vec!["X".to_string()]);

        let after = page.list_components("p1").await.unwrap();
        assert_eq!(after[0].description, "new");
        assert_eq!(after[0].showcase, true);

        let second = reconcile_components("p1", &[declared], &page).await.unwrap();
        assert!(second.is_empty());
    }

    #[tokio::test]
    async fn created_components_start_operational_regardless_of_declaration() {
        let page = InMemoryStatusPage::new();
        let report = reconcile_components("p1", &[component("Fresh")], &page)
            .await
            .unwrap();
        assert_eq!(report.created, vec!["Fresh".to_string()]);

        let listed = page.list_components("p1").await.unwrap();
        assert_eq!(listed[0].status, "operational");
    }

    #[tokio::test]
    async fn modifying_never_touches_live_status() {
        let page = InMemoryStatusPage::new();
        let mut x = remote("id-1", "X");
        x.status = "major_outage".to_string();
        x.description = "old".to_string();
        page.seed_component(x).await;

        let mut declared = component("X");
        declared.description = "new".to_string();

        reconcile_components("p1", &[declared], &page).await.unwrap();

        let after = page.list_components("p1").await.unwrap();
        assert_eq!(after[0].status, "major_outage");
    }

    #[tokio::test]
    async fn duplicate_remote_names_keep_greatest_id() {
        let page = InMemoryStatusPage::new();
        page.seed_component(remote("id-1", "Dup")).await;
        page.seed_component(remote("id-9", "Dup")).await;

        // No declared components: both should be queued for deletion, but
        // only the greatest-ID entry is the canonical one kept in the map,
        // so exactly one delete call happens.
        let report = reconcile_components("p1", &[], &page).await.unwrap();
        assert_eq!(report.deleted, vec!["Dup".to_string()]);
    }
}
