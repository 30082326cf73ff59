use serde::{Deserialize, Serialize};

/// Summary of one reconciliation pass: the names of components or groups
/// deleted, created, and modified, in the order they were applied.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub deleted: Vec<String>,
    pub created: Vec<String>,
    pub modified: Vec<String>,
}

impl ReconcileReport {
    pub fn new() -> Self {
        ReconcileReport::default()
    }

    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty() && self.created.is_empty() && self.modified.is_empty()
    }
}

impl std::fmt::Display for ReconcileReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "nothing to do");
        }
        let mut parts = Vec::new();
        if !self.deleted.is_empty() {
            parts.push(format!("deleted: {}", self.deleted.join(", ")));
        }
        if !self.created.is_empty() {
            parts.push(format!("created: {}", self.created.join(", ")));
        }
        if !self.modified.is_empty() {
            parts.push(format!("modified: {}", self.modified.join(", ")));
        }
        write!(f, "{}", parts.join("; "))
    }
}
