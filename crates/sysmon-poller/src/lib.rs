pub mod error;
pub mod poller;
pub mod render;
pub mod source;
pub mod view;

pub use error::FetchError;
pub use poller::{HostEvent, RefreshOutcome, StatusPoller};
pub use source::{HttpMetricsSource, MetricsSource};
pub use view::{Dashboard, Element, TableContent, TableRow, Tone, View};
