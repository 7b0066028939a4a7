//! Reduction of per-request results into the aggregate report.
use std::time::Duration;

use serde::Serialize;

use crate::http::RequestMetrics;


/// Order-independent summary of a finished run.
///
/// This is the machine-readable record handed back to the caller:
/// `total_time` carries 3 decimals, both rates 2, and the rates divide
/// by the already-rounded time so downstream tooling can recompute them.
#[derive(Debug, Serialize)]
pub struct AggregateReport {
    pub total_time: f64,
    pub total_bytes_transferred: u64,
    pub total_content_bytes_transferred: u64,
    pub requests_per_second: f64,
    pub kbytes_per_second: f64,
    pub failed_requests: u64,
    pub cancelled_requests: u64,
    pub min_latency_ms: u64,
    pub avg_latency_ms: u64,
    pub max_latency_ms: u64,
    pub p50_latency_ms: u64,
    pub p90_latency_ms: u64,
    pub p99_latency_ms: u64,
}

/// Folds collected samples into the final report.
///
/// With `variable_length` off, the first sample that produced a response
/// sets the expected body length and any deviation counts as a failure;
/// a sample is counted as failed at most once.
#[must_use]
pub fn build_report(
    samples: &[RequestMetrics],
    total_time: Duration,
    cancelled_requests: u64,
    variable_length: bool,
) -> AggregateReport {
    let completed = u64::try_from(samples.len()).unwrap_or(u64::MAX);

    let mut total_bytes: u64 = 0;
    let mut total_content_bytes: u64 = 0;
    for sample in samples {
        total_bytes = total_bytes.saturating_add(sample.total_length);
        total_content_bytes = total_content_bytes.saturating_add(sample.content_length);
    }

    let baseline_length = if variable_length {
        None
    } else {
        samples
            .iter()
            .find(|sample| !sample.is_transport_failure())
            .map(|sample| sample.content_length)
    };

    let failed = samples
        .iter()
        .filter(|sample| is_failed(sample, baseline_length))
        .count();
    let failed_requests = u64::try_from(failed).unwrap_or(u64::MAX);

    let rounded_time = round_decimals(total_time.as_secs_f64(), 3);
    let (requests_per_second, kbytes_per_second) = if rounded_time > 0.0 {
        (
            round_decimals(completed as f64 / rounded_time, 2),
            round_decimals((total_bytes as f64 / rounded_time) / 1024.0, 2),
        )
    } else {
        (0.0, 0.0)
    };

    let latency = LatencyStats::from_samples(samples);

    AggregateReport {
        total_time: rounded_time,
        total_bytes_transferred: total_bytes,
        total_content_bytes_transferred: total_content_bytes,
        requests_per_second,
        kbytes_per_second,
        failed_requests,
        cancelled_requests,
        min_latency_ms: latency.min,
        avg_latency_ms: latency.avg,
        max_latency_ms: latency.max,
        p50_latency_ms: latency.p50,
        p90_latency_ms: latency.p90,
        p99_latency_ms: latency.p99,
    }
}

const fn is_failed(sample: &RequestMetrics, baseline_length: Option<u64>) -> bool {
    if !sample.is_success_status() {
        return true;
    }
    if let Some(expected) = baseline_length {
        return sample.content_length != expected;
    }
    false
}

struct LatencyStats {
    min: u64,
    avg: u64,
    max: u64,
    p50: u64,
    p90: u64,
    p99: u64,
}

impl LatencyStats {
    fn from_samples(samples: &[RequestMetrics]) -> Self {
        if samples.is_empty() {
            return Self {
                min: 0,
                avg: 0,
                max: 0,
                p50: 0,
                p90: 0,
                p99: 0,
            };
        }

        let mut values: Vec<u64> = samples
            .iter()
            .map(|sample| u64::try_from(sample.elapsed.as_millis()).unwrap_or(u64::MAX))
            .collect();
        values.sort_unstable();

        let mut latency_sum: u128 = 0;
        for value in &values {
            latency_sum = latency_sum.saturating_add(u128::from(*value));
        }
        let count = u64::try_from(values.len()).unwrap_or(u64::MAX);
        let avg = latency_sum.checked_div(u128::from(count)).unwrap_or(0);

        Self {
            min: values.first().copied().unwrap_or(0),
            avg: u64::try_from(avg).map_or(u64::MAX, |value| value),
            max: values.last().copied().unwrap_or(0),
            p50: percentile(&values, 50),
            p90: percentile(&values, 90),
            p99: percentile(&values, 99),
        }
    }
}

fn percentile(data: &[u64], percentile: u64) -> u64 {
    if data.is_empty() {
        return 0;
    }
    let count = data.len().saturating_sub(1) as u64;
    let index = (percentile.saturating_mul(count).saturating_add(50) / 100) as usize;
    *data.get(index).unwrap_or(&0)
}

fn round_decimals(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
