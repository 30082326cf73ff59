use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::StatusPage;
use crate::error::StatusPageError;
use crate::types::{
    ComponentFields, ComponentGroupFields, ComponentRequest, ComponentStatusFields,
    ComponentStatusRequest, GroupRequest, RemoteComponent, RemoteGroup,
};

/// Production `StatusPage` backed by a single pooled `reqwest::Client`,
/// shared across every caller (reconciler and pipeline alike).
pub struct HttpStatusPage {
    client: Client,
    api_root: String,
    retries: u32,
}

impl HttpStatusPage {
    pub fn new(api_root: String, api_key: String, redirects: usize, retries: u32) -> Result<Self, StatusPageError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            format!("OAuth {api_key}")
                .parse()
                .expect("api key must be a valid header value"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limit(redirects))
            .default_headers(headers)
            .build()?;
        Ok(HttpStatusPage {
            client,
            api_root,
            retries,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_root.trim_end_matches('/'), path)
    }

    /// Issues one request, retrying transport-level failures and 5xx
    /// responses with exponential backoff. A successful (2xx) response's
    /// body is decoded as `T`; any other outcome becomes a `StatusPageError`.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> Result<T, StatusPageError> {
        let url = self.url(path);
        let mut attempt = 0;
        loop {
            let mut req = self.client.request(method.clone(), &url);
            if let Some(body) = body {
                req = req.json(body);
            }
            let outcome = req.send().await;
            let should_retry_transport = outcome.is_err() && attempt < self.retries;
            match outcome {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response.json::<T>().await?);
                    }
                    if status.is_server_error() && attempt < self.retries {
                        attempt += 1;
                        tokio::time::sleep(backoff(attempt)).await;
                        continue;
                    }
                    let body = response.text().await.unwrap_or_default();
                    return Err(StatusPageError::RemoteRejected {
                        status: status.as_u16(),
                        url,
                        body,
                    });
                }
                Err(e) if should_retry_transport => {
                    let _ = e;
                    attempt += 1;
                    tokio::time::sleep(backoff(attempt)).await;
                }
                Err(e) => return Err(StatusPageError::RemoteUnavailable(e)),
            }
        }
    }

    async fn send_no_content(&self, method: Method, path: &str) -> Result<(), StatusPageError> {
        let url = self.url(path);
        let mut attempt = 0;
        loop {
            let outcome = self.client.request(method.clone(), &url).send().await;
            match outcome {
                Ok(response) if response.status().is_success() => return Ok(()),
                Ok(response) if response.status().is_server_error() && attempt < self.retries => {
                    attempt += 1;
                    tokio::time::sleep(backoff(attempt)).await;
                }
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(StatusPageError::RemoteRejected {
                        status: status.as_u16(),
                        url,
                        body,
                    });
                }
                Err(e) if attempt < self.retries => {
                    let _ = e;
                    attempt += 1;
                    tokio::time::sleep(backoff(attempt)).await;
                }
                Err(e) => return Err(StatusPageError::RemoteUnavailable(e)),
            }
        }
    }
}

fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(200u64.saturating_mul(1u64 << attempt.min(8)))
}

#[async_trait]
impl StatusPage for HttpStatusPage {
    async fn list_components(&self, page_id: &str) -> Result<Vec<RemoteComponent>, StatusPageError> {
        let all: Vec<RemoteComponent> = self
            .send(
                Method::GET,
                &format!("/pages/{page_id}/components"),
                None::<&()>,
            )
            .await?;
        Ok(all.into_iter().filter(|c| !c.is_group).collect())
    }

    async fn create_component(
        &self,
        page_id: &str,
        fields: ComponentFields,
    ) -> Result<RemoteComponent, StatusPageError> {
        self.send(
            Method::POST,
            &format!("/pages/{page_id}/components"),
            Some(&ComponentRequest { component: fields }),
        )
        .await
    }

    async fn patch_component(
        &self,
        page_id: &str,
        component_id: &str,
        fields: ComponentFields,
    ) -> Result<RemoteComponent, StatusPageError> {
        self.send(
            Method::PATCH,
            &format!("/pages/{page_id}/components/{component_id}"),
            Some(&ComponentRequest { component: fields }),
        )
        .await
    }

    async fn patch_component_status(
        &self,
        page_id: &str,
        component_id: &str,
        status: &str,
    ) -> Result<RemoteComponent, StatusPageError> {
        let request = ComponentStatusRequest {
            component: ComponentStatusFields {
                status: status.to_string(),
            },
        };
        self.send(
            Method::PATCH,
            &format!("/pages/{page_id}/components/{component_id}"),
            Some(&request),
        )
        .await
    }

    async fn delete_component(&self, page_id: &str, component_id: &str) -> Result<(), StatusPageError> {
        self.send_no_content(
            Method::DELETE,
            &format!("/pages/{page_id}/components/{component_id}"),
        )
        .await
    }

    async fn list_groups(&self, page_id: &str) -> Result<Vec<RemoteGroup>, StatusPageError> {
        self.send(
            Method::GET,
            &format!("/pages/{page_id}/component-groups"),
            None::<&()>,
        )
        .await
    }

    async fn create_group(
        &self,
        page_id: &str,
        fields: ComponentGroupFields,
    ) -> Result<RemoteGroup, StatusPageError> {
        self.send(
            Method::POST,
            &format!("/pages/{page_id}/component-groups"),
            Some(&GroupRequest::new(
                fields.name,
                fields.description,
                fields.components,
            )),
        )
        .await
    }

    async fn patch_group(
        &self,
        page_id: &str,
        group_id: &str,
        fields: ComponentGroupFields,
    ) -> Result<RemoteGroup, StatusPageError> {
        self.send(
            Method::PATCH,
            &format!("/pages/{page_id}/component-groups/{group_id}"),
            Some(&GroupRequest::new(
                fields.name,
                fields.description,
                fields.components,
            )),
        )
        .await
    }

    async fn delete_group(&self, page_id: &str, group_id: &str) -> Result<(), StatusPageError> {
        self.send_no_content(
            Method::DELETE,
            &format!("/pages/{page_id}/component-groups/{group_id}"),
        )
        .await
    }
}
