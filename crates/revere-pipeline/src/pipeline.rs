use std::sync::Arc;

use revere_domain::ServiceToComponentMapping;
use revere_state::State;
use revere_statuspage::StatusPage;
use tokio::sync::watch;
use tracing::{error, info};

use crate::error::PipelineError;
use crate::labels::{parse_labels, AlertLabels};
use crate::monitoring::MonitoringPacket;
use crate::subscriber::Subscriber;

/// Binds a `State` registry and a `StatusPage` client to a declared routing
/// table, and drives the decode -> parse -> route -> update loop over a
/// `Subscriber`.
pub struct Pipeline {
    state: Arc<State>,
    status_page: Arc<dyn StatusPage>,
    page_id: String,
    mapping: Vec<ServiceToComponentMapping>,
}

impl Pipeline {
    pub fn new(
        state: Arc<State>,
        status_page: Arc<dyn StatusPage>,
        page_id: String,
        mapping: Vec<ServiceToComponentMapping>,
    ) -> Self {
        Pipeline {
            state,
            status_page,
            page_id,
            mapping,
        }
    }

    fn route(&self, labels: &AlertLabels) -> Vec<String> {
        self.mapping
            .iter()
            .filter(|m| {
                m.service_name == labels.service_name
                    && m.service_environment == labels.service_environment
            })
            .flat_map(|m| m.affects_components_named.iter().cloned())
            .collect()
    }

    /// Decodes, routes, and applies one message. `Ok(())` means the message
    /// was fully handled (successfully or by a recoverable parse failure)
    /// and should be acknowledged. `Err` is fatal: our model of the world —
    /// not just this message — may be wrong, so the caller must not
    /// acknowledge and must stop.
    pub async fn handle_one(&self, payload: &[u8]) -> Result<(), PipelineError> {
        let packet: MonitoringPacket = match serde_json::from_slice(payload) {
            Ok(p) => p,
            Err(e) => {
                info!(error = %e, "malformed monitoring payload, acknowledging");
                return Ok(());
            }
        };

        let labels = match parse_labels(&packet) {
            Ok(l) => l,
            Err(e) => {
                info!(
                    incident_id = %packet.incident.incident_id,
                    error = %e,
                    "could not parse alert labels, acknowledging"
                );
                return Ok(());
            }
        };

        let targets = self.route(&labels);
        if targets.is_empty() {
            info!(
                service = %labels.service_name,
                environment = %labels.service_environment,
                "alert matched no routing entry, acknowledging"
            );
            return Ok(());
        }

        let incident_id = packet.incident.incident_id.clone();
        let ended = packet.incident.has_ended();
        let alert_type = labels.alert_type;

        for name in targets {
            let status_page = self.status_page.clone();
            let page_id = self.page_id.clone();
            let incident_id = incident_id.clone();

            self.state
                .use_component(&name, move |cs| {
                    let status_page = status_page.clone();
                    let page_id = page_id.clone();
                    async move {
                        let changed = if ended {
                            cs.resolve_incident(&incident_id)
                        } else {
                            cs.log_incident(incident_id.clone(), alert_type)
                        };
                        if changed {
                            status_page
                                .patch_component_status(&page_id, cs.id(), cs.desired_status().to_wire())
                                .await?;
                        }
                        Ok::<(), PipelineError>(())
                    }
                })
                .await??;
        }

        Ok(())
    }

    /// Consumes messages until the subscriber is drained or `cancel` fires.
    /// A handler failure is unrecoverable (see `PipelineError`): some other
    /// in-flight handler may be holding a per-component lock or mid-way
    /// through a remote write, so there is no safe way to unwind gracefully.
    /// The process exits immediately, without acknowledging the failing
    /// message, so the broker redelivers it after the lease expires rather
    /// than racing an explicit nack against our own exit.
    pub async fn run(&self, mut subscriber: Box<dyn Subscriber>, mut cancel: watch::Receiver<bool>) {
        loop {
            tokio::select! {
                _ = cancel.changed() => {
                    info!("pipeline shutting down");
                    return;
                }
                message = subscriber.recv() => {
                    let Some(message) = message else {
                        info!("subscription drained, pipeline stopping");
                        return;
                    };
                    let data = message.data().to_vec();
                    match self.handle_one(&data).await {
                        Ok(()) => message.ack().await,
                        Err(e) => {
                            error!(error = %e, "unrecoverable pipeline error, exiting without acknowledging");
                            std::process::exit(1);
                        }
                    }
                }
            }
        }
    }
}
