use async_trait::async_trait;

use crate::error::StatusPageError;
use crate::types::{ComponentFields, ComponentGroupFields, RemoteComponent, RemoteGroup};

/// CRUD over a remote status page's components and groups. The reconciler
/// and pipeline depend only on this trait — neither knows whether the
/// implementation behind it speaks HTTP.
#[async_trait]
pub trait StatusPage: Send + Sync {
    async fn list_components(&self, page_id: &str) -> Result<Vec<RemoteComponent>, StatusPageError>;
    async fn create_component(
        &self,
        page_id: &str,
        fields: ComponentFields,
    ) -> Result<RemoteComponent, StatusPageError>;
    async fn patch_component(
        &self,
        page_id: &str,
        component_id: &str,
        fields: ComponentFields,
    ) -> Result<RemoteComponent, StatusPageError>;
    /// Sends *only* the status field; used by the pipeline so that a
    /// status-only update can never clobber other fields concurrently
    /// being reconciled.
    async fn patch_component_status(
        &self,
        page_id: &str,
        component_id: &str,
        status: &str,
    ) -> Result<RemoteComponent, StatusPageError>;
    async fn delete_component(&self, page_id: &str, component_id: &str) -> Result<(), StatusPageError>;

    async fn list_groups(&self, page_id: &str) -> Result<Vec<RemoteGroup>, StatusPageError>;
    async fn create_group(
        &self,
        page_id: &str,
        fields: ComponentGroupFields,
    ) -> Result<RemoteGroup, StatusPageError>;
    async fn patch_group(
        &self,
        page_id: &str,
        group_id: &str,
        fields: ComponentGroupFields,
    ) -> Result<RemoteGroup, StatusPageError>;
    async fn delete_group(&self, page_id: &str, group_id: &str) -> Result<(), StatusPageError>;
}
