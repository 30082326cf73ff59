use std::collections::HashMap;

use serde::Deserialize;

/// The message body published by the upstream monitoring service.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringPacket {
    pub version: String,
    pub incident: MonitoringIncident,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonitoringResource {
    #[serde(default)]
    pub r#type: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonitoringMetric {
    #[serde(default)]
    pub r#type: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringIncident {
    pub incident_id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub state: String,
    pub started_at: i64,
    #[serde(default)]
    pub ended_at: i64,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub resource: MonitoringResource,
    #[serde(default)]
    pub metric: MonitoringMetric,
    #[serde(default)]
    pub policy_name: String,
    #[serde(default)]
    pub policy_user_labels: HashMap<String, String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl MonitoringIncident {
    /// An explicit "open"/"closed" state always wins; absent either, an
    /// incident is ended iff it carries an end time after its start time.
    pub fn has_ended(&self) -> bool {
        match self.state.as_str() {
            "open" => false,
            "closed" => true,
            _ => self.ended_at > self.started_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(state: &str, started_at: i64, ended_at: i64) -> MonitoringIncident {
        MonitoringIncident {
            incident_id: "i1".to_string(),
            url: String::new(),
            state: state.to_string(),
            started_at,
            ended_at,
            summary: String::new(),
            resource: MonitoringResource::default(),
            metric: MonitoringMetric::default(),
            policy_name: String::new(),
            policy_user_labels: HashMap::new(),
            errors: Vec::new(),
        }
    }

    #[test]
    fn explicit_open_is_never_ended() {
        assert!(!incident("open", 100, 200).has_ended());
    }

    #[test]
    fn explicit_closed_is_always_ended() {
        assert!(incident("closed", 200, 100).has_ended());
    }

    #[test]
    fn unspecified_state_falls_back_to_timestamps() {
        assert!(incident("", 100, 200).has_ended());
        assert!(!incident("", 200, 100).has_ended());
        assert!(!incident("", 100, 100).has_ended());
    }

    #[test]
    fn decodes_from_json() {
        let raw = r#"{
            "version": "1.2",
            "incident": {
                "incident_id": "abc",
                "state": "open",
                "started_at": 1000,
                "ended_at": 0,
                "policy_user_labels": {
                    "revere-service-name": "checkout",
                    "revere-service-environment": "prod",
                    "revere-alert-type": "major-outage"
                }
            }
        }"#;
        let packet: MonitoringPacket = serde_json::from_str(raw).unwrap();
        assert_eq!(packet.incident.incident_id, "abc");
        assert!(!packet.incident.has_ended());
        assert_eq!(
            packet.incident.policy_user_labels.get("revere-alert-type").unwrap(),
            "major-outage"
        );
    }
}
