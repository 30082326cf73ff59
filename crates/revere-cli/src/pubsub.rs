use std::collections::VecDeque;

use base64::Engine as _;
use revere_pipeline::{Message, Subscriber};
use tracing::{debug, warn};

/// `Subscriber` over Google Cloud Pub/Sub's HTTP `pull`/`acknowledge`
/// surface, reusing the same `reqwest` client stack as `HttpStatusPage`
/// rather than introducing a second transport dependency (streaming gRPC).
///
/// Authentication is an OAuth2 bearer token supplied by the caller. Minting
/// and refreshing that token (service-account JWT exchange, workload
/// identity, ADC discovery) is out of this crate's scope — see DESIGN.md.
pub struct GcpPubSubSubscriber {
    client: reqwest::Client,
    project_id: String,
    subscription_id: String,
    token: String,
    pending: VecDeque<(String, Vec<u8>)>,
}

const PULL_MAX_MESSAGES: u32 = 20;

impl GcpPubSubSubscriber {
    pub fn new(project_id: String, subscription_id: String, token: String) -> Self {
        GcpPubSubSubscriber {
            client: reqwest::Client::new(),
            project_id,
            subscription_id,
            token,
            pending: VecDeque::new(),
        }
    }

    fn subscription_url(&self, suffix: &str) -> String {
        format!(
            "https://pubsub.googleapis.com/v1/projects/{}/subscriptions/{}{}",
            self.project_id, self.subscription_id, suffix
        )
    }

    async fn pull(&self) -> anyhow::Result<Vec<(String, Vec<u8>)>> {
        let resp = self
            .client
            .post(self.subscription_url(":pull"))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "maxMessages": PULL_MAX_MESSAGES }))
            .send()
            .await?
            .error_for_status()?;
        let body: PullResponse = resp.json().await?;

        let mut out = Vec::with_capacity(body.received_messages.len());
        for received in body.received_messages {
            let data = base64::engine::general_purpose::STANDARD
                .decode(received.message.data)
                .unwrap_or_default();
            out.push((received.ack_id, data));
        }
        Ok(out)
    }

    async fn acknowledge(client: reqwest::Client, url: String, token: String, ack_id: String) {
        let result = client
            .post(url)
            .bearer_auth(&token)
            .json(&serde_json::json!({ "ackIds": [ack_id] }))
            .send()
            .await;
        if let Err(e) = result {
            warn!(error = %e, "failed to acknowledge pub/sub message");
        }
    }
}

#[derive(serde::Deserialize)]
struct PullResponse {
    #[serde(default, rename = "receivedMessages")]
    received_messages: Vec<ReceivedMessage>,
}

#[derive(serde::Deserialize)]
struct ReceivedMessage {
    #[serde(rename = "ackId")]
    ack_id: String,
    message: PubsubMessage,
}

#[derive(serde::Deserialize)]
struct PubsubMessage {
    #[serde(default)]
    data: String,
}

#[async_trait::async_trait]
impl Subscriber for GcpPubSubSubscriber {
    async fn recv(&mut self) -> Option<Message> {
        loop {
            if let Some((ack_id, data)) = self.pending.pop_front() {
                let client = self.client.clone();
                let url = self.subscription_url(":acknowledge");
                let token = self.token.clone();
                return Some(Message::new(data, move || {
                    Self::acknowledge(client, url, token, ack_id)
                }));
            }

            match self.pull().await {
                Ok(messages) if messages.is_empty() => {
                    debug!("pub/sub pull returned no messages, retrying");
                    tokio::time::sleep(std::time::Duration::from_secs(2)).await;
                }
                Ok(messages) => self.pending.extend(messages),
                Err(e) => {
                    warn!(error = %e, "pub/sub pull failed, retrying after backoff");
                    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                }
            }
        }
    }
}
