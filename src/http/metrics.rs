use std::time::Duration;

/// Status recorded when the request never produced an HTTP response
/// (connect failure, timeout, or a broken body read).
pub const TRANSPORT_FAILURE_STATUS: u16 = 0;

/// Outcome of a single request: status, wall-clock latency, and the
/// number of body bytes read.
#[derive(Clone, Copy, Debug)]
pub struct RequestMetrics {
    pub status: u16,
    pub elapsed: Duration,
    pub content_length: u64,
    pub total_length: u64,
}

impl RequestMetrics {
    #[must_use]
    pub const fn new(status: u16, elapsed: Duration, content_length: u64) -> Self {
        Self {
            status,
            elapsed,
            content_length,
            total_length: content_length,
        }
    }

    #[must_use]
    pub const fn transport_failure(elapsed: Duration) -> Self {
        Self::new(TRANSPORT_FAILURE_STATUS, elapsed, 0)
    }

    #[must_use]
    pub const fn is_transport_failure(self) -> bool {
        self.status == TRANSPORT_FAILURE_STATUS
    }

    /// Every status outside `[200, 400)` counts as a failed request.
    #[must_use]
    pub const fn is_success_status(self) -> bool {
        self.status >= 200 && self.status < 400
    }
}
