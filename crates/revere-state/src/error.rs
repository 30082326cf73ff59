use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("unknown component: {0}")]
    UnknownComponent(String),
}
