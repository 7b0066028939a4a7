//! HTTP request execution.
mod executor;
mod metrics;


pub use executor::{HttpExecutor, RequestExecutor};
pub use metrics::{RequestMetrics, TRANSPORT_FAILURE_STATUS};
