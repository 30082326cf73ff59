use thiserror::Error;

use revere_state::StateError;
use revere_statuspage::StatusPageError;

/// Errors from handling a single monitoring message.
///
/// `MissingLabel`, `BadAlertType`, and `MalformedPayload` are recovered
/// locally by the caller (logged, message acknowledged); `UnknownComponent`
/// and `RemoteStatusPage` are fatal and propagate out of `handle_one`
/// unacknowledged.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("malformed monitoring payload: {0}")]
    MalformedPayload(String),

    #[error("missing required label: {0}")]
    MissingLabel(String),

    #[error("'{0}' is not a recognized alert type")]
    BadAlertType(String),

    #[error(transparent)]
    UnknownComponent(#[from] StateError),

    #[error(transparent)]
    RemoteStatusPage(#[from] StatusPageError),
}
