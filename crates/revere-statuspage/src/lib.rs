pub mod client;
pub mod error;
pub mod http;
pub mod memory;
pub mod types;

pub use client::StatusPage;
pub use error::StatusPageError;
pub use http::HttpStatusPage;
pub use memory::InMemoryStatusPage;
pub use types::{ComponentFields, ComponentGroupFields, RemoteComponent, RemoteGroup};
