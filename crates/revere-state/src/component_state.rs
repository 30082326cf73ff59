use std::collections::HashMap;

use revere_domain::Status;

/// Per-component record of currently open incidents and the status they
/// jointly imply. Every mutating method recomputes `desired_status` from
/// scratch and reports whether the cached value moved, so callers know
/// whether a remote write is owed.
///
/// Callers must only reach a `ComponentState` through `State::use_component`
/// (crate::registry), which holds the per-component lock for the duration
/// of the hook — nothing here is synchronized on its own.
#[derive(Debug, Clone)]
pub struct ComponentState {
    id: String,
    open_incidents: HashMap<String, Status>,
    desired_status: Status,
}

impl ComponentState {
    pub(crate) fn new(id: String) -> Self {
        ComponentState {
            id,
            open_incidents: HashMap::new(),
            desired_status: Status::Operational,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn set_id(&mut self, id: String) {
        self.id = id;
    }

    pub fn desired_status(&self) -> Status {
        self.desired_status
    }

    /// Records that `incident_id` is open at `severity`. Returns whether
    /// `desired_status` changed as a result.
    pub fn log_incident(&mut self, incident_id: impl Into<String>, severity: Status) -> bool {
        self.open_incidents.insert(incident_id.into(), severity);
        self.recalculate_desired_status()
    }

    /// Removes `incident_id` from the open set, if present. Returns whether
    /// `desired_status` changed as a result.
    pub fn resolve_incident(&mut self, incident_id: &str) -> bool {
        self.open_incidents.remove(incident_id);
        self.recalculate_desired_status()
    }

    fn recalculate_desired_status(&mut self) -> bool {
        let folded = self
            .open_incidents
            .values()
            .fold(Status::Operational, |acc, s| acc.worst_with(*s));
        let changed = folded != self.desired_status;
        self.desired_status = folded;
        changed
    }

    #[cfg(test)]
    pub(crate) fn open_incident_count(&self) -> usize {
        self.open_incidents.len()
    }
}
