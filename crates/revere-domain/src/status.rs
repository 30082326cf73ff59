use std::fmt;

/// A component's operational state. Declaration order is severity order:
/// each variant is "worse" than everything before it, maintenance worst of all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Operational,
    DegradedPerformance,
    PartialOutage,
    MajorOutage,
    UnderMaintenance,
}

impl Status {
    /// The worse of two statuses under the severity ordering above.
    pub fn worst_with(self, other: Status) -> Status {
        self.max(other)
    }

    pub fn to_human(self) -> &'static str {
        match self {
            Status::Operational => "Operational",
            Status::DegradedPerformance => "Degraded Performance",
            Status::PartialOutage => "Partial Outage",
            Status::MajorOutage => "Major Outage",
            Status::UnderMaintenance => "Under Maintenance",
        }
    }

    pub fn to_wire(self) -> &'static str {
        match self {
            Status::Operational => "operational",
            Status::DegradedPerformance => "degraded_performance",
            Status::PartialOutage => "partial_outage",
            Status::MajorOutage => "major_outage",
            Status::UnderMaintenance => "under_maintenance",
        }
    }

    /// Parses the kebab-case form used in alert routing labels
    /// ("major-outage", not "major_outage"). Fails on anything else.
    pub fn from_kebab(s: &str) -> Result<Status, StatusParseError> {
        match s {
            "operational" => Ok(Status::Operational),
            "degraded-performance" => Ok(Status::DegradedPerformance),
            "partial-outage" => Ok(Status::PartialOutage),
            "major-outage" => Ok(Status::MajorOutage),
            "under-maintenance" => Ok(Status::UnderMaintenance),
            other => Err(StatusParseError(other.to_string())),
        }
    }

    pub fn to_kebab(self) -> &'static str {
        match self {
            Status::Operational => "operational",
            Status::DegradedPerformance => "degraded-performance",
            Status::PartialOutage => "partial-outage",
            Status::MajorOutage => "major-outage",
            Status::UnderMaintenance => "under-maintenance",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_human())
    }
}

#[derive(Debug, Clone)]
pub struct StatusParseError(pub String);

impl fmt::Display for StatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a recognized status", self.0)
    }
}

impl std::error::Error for StatusParseError {}
