use clap::Parser;
use std::time::Duration;

use super::parsers::{parse_duration_arg, parse_positive_u64, parse_positive_usize};
use super::types::{PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Minimal async HTTP load-testing harness in Rust - bounded worker pools, per-request latency capture, and machine-readable aggregate reports for automation pipelines."
)]
pub struct LoadArgs {
    /// Target URL for the load test
    #[arg(long, short)]
    pub url: Option<String>,

    /// Total number of requests to issue
    #[arg(
        long = "requests",
        short = 'n',
        default_value = "1000",
        value_parser = parse_positive_u64
    )]
    pub requests: PositiveU64,

    /// Number of concurrent workers (clamped to the request count)
    #[arg(
        long = "workers",
        short = 'c',
        default_value = "5",
        value_parser = parse_positive_usize
    )]
    pub workers: PositiveUsize,

    /// Send a keep-alive header and reuse connections between requests
    #[arg(long = "keepalive", short = 'k')]
    pub keepalive: bool,

    /// Tolerate response bodies whose length varies between requests
    #[arg(long = "variable-length", short = 'L')]
    pub variable_length: bool,

    /// Request timeout (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        default_value = "10s",
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// Timeout for establishing a new connection (supports ms/s/m/h)
    #[arg(
        long = "connect-timeout",
        default_value = "5s",
        value_parser = parse_duration_arg
    )]
    pub connect_timeout: Duration,

    /// Enable verbose logging (sets log level to debug unless overridden by URILOAD_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Path to config file (TOML/JSON). Defaults to ./uriload.toml or ./uriload.json if present.
    #[arg(long)]
    pub config: Option<String>,
}
