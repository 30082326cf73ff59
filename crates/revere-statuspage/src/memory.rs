use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::client::StatusPage;
use crate::error::StatusPageError;
use crate::types::{ComponentFields, ComponentGroupFields, RemoteComponent, RemoteGroup};

/// In-memory `StatusPage` double used by reconciler and pipeline tests.
/// Assigns IDs sequentially so tests can assert on them deterministically.
pub struct InMemoryStatusPage {
    components: RwLock<HashMap<String, RemoteComponent>>,
    groups: RwLock<HashMap<String, RemoteGroup>>,
    next_id: AtomicU64,
    patch_status_calls: AtomicU64,
}

impl InMemoryStatusPage {
    pub fn new() -> Self {
        InMemoryStatusPage {
            components: RwLock::new(HashMap::new()),
            groups: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            patch_status_calls: AtomicU64::new(0),
        }
    }

    /// Number of `patch_component_status` calls observed so far. Lets
    /// pipeline tests assert that an unchanged desired status never issues
    /// a remote write.
    pub fn patch_status_call_count(&self) -> u64 {
        self.patch_status_calls.load(Ordering::SeqCst)
    }

    fn fresh_id(&self) -> String {
        format!("id-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Seeds a remote component directly, bypassing `create_component`, so
    /// tests can set up a pre-existing remote state before reconciling.
    pub async fn seed_component(&self, component: RemoteComponent) {
        self.components
            .write()
            .await
            .insert(component.id.clone(), component);
    }

    pub async fn seed_group(&self, group: RemoteGroup) {
        self.groups.write().await.insert(group.id.clone(), group);
    }
}

impl Default for InMemoryStatusPage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatusPage for InMemoryStatusPage {
    async fn list_components(&self, _page_id: &str) -> Result<Vec<RemoteComponent>, StatusPageError> {
        Ok(self
            .components
            .read()
            .await
            .values()
            .filter(|c| !c.is_group)
            .cloned()
            .collect())
    }

    async fn create_component(
        &self,
        page_id: &str,
        fields: ComponentFields,
    ) -> Result<RemoteComponent, StatusPageError> {
        let component = RemoteComponent {
            automation_email: String::new(),
            created_at: String::new(),
            description: fields.description,
            is_group: false,
            group_id: fields.group_id,
            id: self.fresh_id(),
            name: fields.name,
            only_show_if_degraded: fields.only_show_if_degraded,
            page_id: page_id.to_string(),
            position: 0,
            showcase: fields.showcase,
            start_date: fields.start_date,
            status: if fields.status.is_empty() {
                "operational".to_string()
            } else {
                fields.status
            },
            updated_at: String::new(),
        };
        self.components
            .write()
            .await
            .insert(component.id.clone(), component.clone());
        Ok(component)
    }

    async fn patch_component(
        &self,
        _page_id: &str,
        component_id: &str,
        fields: ComponentFields,
    ) -> Result<RemoteComponent, StatusPageError> {
        let mut components = self.components.write().await;
        let existing = components.get_mut(component_id).ok_or_else(|| {
            StatusPageError::RemoteRejected {
                status: 404,
                url: format!("/components/{component_id}"),
                body: "not found".to_string(),
            }
        })?;
        existing.description = fields.description;
        existing.group_id = fields.group_id;
        existing.name = fields.name;
        existing.only_show_if_degraded = fields.only_show_if_degraded;
        existing.showcase = fields.showcase;
        existing.start_date = fields.start_date;
        if !fields.status.is_empty() {
            existing.status = fields.status;
        }
        Ok(existing.clone())
    }

    async fn patch_component_status(
        &self,
        _page_id: &str,
        component_id: &str,
        status: &str,
    ) -> Result<RemoteComponent, StatusPageError> {
        self.patch_status_calls.fetch_add(1, Ordering::SeqCst);
        let mut components = self.components.write().await;
        let existing = components.get_mut(component_id).ok_or_else(|| {
            StatusPageError::RemoteRejected {
                status: 404,
                url: format!("/components/{component_id}"),
                body: "not found".to_string(),
            }
        })?;
        existing.status = status.to_string();
        Ok(existing.clone())
    }

    async fn delete_component(&self, _page_id: &str, component_id: &str) -> Result<(), StatusPageError> {
        self.components.write().await.remove(component_id);
        Ok(())
    }

    async fn list_groups(&self, _page_id: &str) -> Result<Vec<RemoteGroup>, StatusPageError> {
        Ok(self.groups.read().await.values().cloned().collect())
    }

    async fn create_group(
        &self,
        page_id: &str,
        fields: ComponentGroupFields,
    ) -> Result<RemoteGroup, StatusPageError> {
        let group = RemoteGroup {
            components: fields.components,
            created_at: String::new(),
            description: fields.description,
            id: self.fresh_id(),
            name: fields.name,
            page_id: page_id.to_string(),
            position: 0,
            updated_at: String::new(),
        };
        self.groups
            .write()
            .await
            .insert(group.id.clone(), group.clone());
        Ok(group)
    }

    async fn patch_group(
        &self,
        _page_id: &str,
        group_id: &str,
        fields: ComponentGroupFields,
    ) -> Result<RemoteGroup, StatusPageError> {
        let mut groups = self.groups.write().await;
        let existing = groups
            .get_mut(group_id)
            .ok_or_else(|| StatusPageError::RemoteRejected {
                status: 404,
                url: format!("/component-groups/{group_id}"),
                body: "not found".to_string(),
            })?;
        existing.components = fields.components;
        existing.name = fields.name;
        existing.description = fields.description;
        Ok(existing.clone())
    }

    async fn delete_group(&self, _page_id: &str, group_id: &str) -> Result<(), StatusPageError> {
        self.groups.write().await.remove(group_id);
        Ok(())
    }
}
