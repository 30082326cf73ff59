pub mod error;
pub mod labels;
pub mod monitoring;
pub mod pipeline;
pub mod subscriber;

pub use error::PipelineError;
pub use labels::{parse_labels, AlertLabels};
pub use monitoring::{MonitoringIncident, MonitoringMetric, MonitoringPacket, MonitoringResource};
pub use pipeline::Pipeline;
pub use subscriber::{Message, Subscriber};
