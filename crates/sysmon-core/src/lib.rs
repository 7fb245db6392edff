// Domain modules
pub mod config;
pub mod display;
pub mod error;
pub mod metrics;
pub mod status;

pub use config::PollerConfig;
pub use error::{Result, SysmonError};
pub use metrics::{LatestSample, MetricsSummary, ProcessEntry};
pub use status::Connectivity;
