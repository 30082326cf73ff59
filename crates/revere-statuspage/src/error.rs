use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatusPageError {
    #[error("remote status page unreachable: {0}")]
    RemoteUnavailable(#[from] reqwest::Error),

    #[error("{status} from {url}: {body}")]
    RemoteRejected {
        status: u16,
        url: String,
        body: String,
    },
}
