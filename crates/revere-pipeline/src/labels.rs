use revere_domain::Status;

use crate::error::PipelineError;
use crate::monitoring::MonitoringPacket;

const SERVICE_NAME_LABEL: &str = "revere-service-name";
const SERVICE_ENVIRONMENT_LABEL: &str = "revere-service-environment";
const ALERT_TYPE_LABEL: &str = "revere-alert-type";

/// Routing labels extracted from a monitoring payload's policy user labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertLabels {
    pub service_name: String,
    pub service_environment: String,
    pub alert_type: Status,
}

/// Extracts the three labels the pipeline requires to route an alert.
/// Missing labels and unrecognized alert types are both non-fatal for the
/// caller — they indicate a malformed or unrelated message, not a broken
/// local model.
pub fn parse_labels(packet: &MonitoringPacket) -> Result<AlertLabels, PipelineError> {
    let labels = &packet.incident.policy_user_labels;

    let service_name = labels
        .get(SERVICE_NAME_LABEL)
        .ok_or_else(|| PipelineError::MissingLabel(SERVICE_NAME_LABEL.to_string()))?
        .clone();
    let service_environment = labels
        .get(SERVICE_ENVIRONMENT_LABEL)
        .ok_or_else(|| PipelineError::MissingLabel(SERVICE_ENVIRONMENT_LABEL.to_string()))?
        .clone();
    let alert_type_raw = labels
        .get(ALERT_TYPE_LABEL)
        .ok_or_else(|| PipelineError::MissingLabel(ALERT_TYPE_LABEL.to_string()))?;
    let alert_type = Status::from_kebab(alert_type_raw)
        .map_err(|_| PipelineError::BadAlertType(alert_type_raw.clone()))?;

    Ok(AlertLabels {
        service_name,
        service_environment,
        alert_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitoring::{MonitoringIncident, MonitoringMetric, MonitoringResource};
    use std::collections::HashMap;

    fn packet_with_labels(labels: HashMap<String, String>) -> MonitoringPacket {
        MonitoringPacket {
            version: "1.2".to_string(),
            incident: MonitoringIncident {
                incident_id: "i1".to_string(),
                url: String::new(),
                state: "open".to_string(),
                started_at: 0,
                ended_at: 0,
                summary: String::new(),
                resource: MonitoringResource::default(),
                metric: MonitoringMetric::default(),
                policy_name: String::new(),
                policy_user_labels: labels,
                errors: Vec::new(),
            },
        }
    }

    #[test]
    fn extracts_all_three_labels() {
        let labels = HashMap::from([
            (SERVICE_NAME_LABEL.to_string(), "checkout".to_string()),
            (SERVICE_ENVIRONMENT_LABEL.to_string(), "prod".to_string()),
            (ALERT_TYPE_LABEL.to_string(), "major-outage".to_string()),
        ]);
        let parsed = parse_labels(&packet_with_labels(labels)).unwrap();
        assert_eq!(parsed.service_name, "checkout");
        assert_eq!(parsed.service_environment, "prod");
        assert_eq!(parsed.alert_type, Status::MajorOutage);
    }

    #[test]
    fn missing_label_fails() {
        let labels = HashMap::from([
            (SERVICE_NAME_LABEL.to_string(), "checkout".to_string()),
            (ALERT_TYPE_LABEL.to_string(), "major-outage".to_string()),
        ]);
        let err = parse_labels(&packet_with_labels(labels)).unwrap_err();
        assert!(matches!(err, PipelineError::MissingLabel(l) if l == SERVICE_ENVIRONMENT_LABEL));
    }

    #[test]
    fn unrecognized_alert_type_fails() {
        let labels = HashMap::from([
            (SERVICE_NAME_LABEL.to_string(), "checkout".to_string()),
            (SERVICE_ENVIRONMENT_LABEL.to_string(), "prod".to_string()),
            (ALERT_TYPE_LABEL.to_string(), "on_fire".to_string()),
        ]);
        let err = parse_labels(&packet_with_labels(labels)).unwrap_err();
        assert!(matches!(err, PipelineError::BadAlertType(t) if t == "on_fire"));
    }
}
