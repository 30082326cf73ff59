use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("status page error: {0}")]
    StatusPage(#[from] revere_statuspage::StatusPageError),

    #[error("group '{group}' names component '{member}', which isn't declared")]
    UnknownComponentInGroup { group: String, member: String },
}
