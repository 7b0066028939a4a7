use std::time::Duration;

use url::Url;

use crate::args::{LoadArgs, PositiveU64, PositiveUsize};
use crate::error::{AppError, AppResult, ValidationError};

/// Validated description of one load-test run.
///
/// Construction is the fail-fast gate: every field is checked here,
/// before any connection is opened.
#[derive(Debug, Clone)]
pub struct LoadPlan {
    pub url: Url,
    pub request_count: PositiveU64,
    pub workers: PositiveUsize,
    pub keep_alive: bool,
    pub variable_length: bool,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl LoadPlan {
    /// Validates arguments into an executable plan.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the URL is missing, empty,
    /// unparseable, or has no host.
    pub fn new(args: &LoadArgs) -> AppResult<Self> {
        let raw_url = args
            .url
            .as_deref()
            .ok_or_else(|| AppError::validation(ValidationError::MissingUrl))?;
        if raw_url.trim().is_empty() {
            return Err(AppError::validation(ValidationError::UrlEmpty));
        }
        let url = Url::parse(raw_url).map_err(|err| {
            AppError::validation(ValidationError::InvalidUrl {
                url: raw_url.to_owned(),
                source: err,
            })
        })?;
        if !url.has_host() {
            return Err(AppError::validation(ValidationError::UrlMissingHost));
        }

        Ok(Self {
            url,
            request_count: args.requests,
            workers: clamp_workers(args.workers, args.requests),
            keep_alive: args.keepalive,
            variable_length: args.variable_length,
            request_timeout: args.request_timeout,
            connect_timeout: args.connect_timeout,
        })
    }
}

/// More slots than requests would just idle; cap at the request count.
fn clamp_workers(workers: PositiveUsize, requests: PositiveU64) -> PositiveUsize {
    let request_cap = usize::try_from(requests.get()).unwrap_or(usize::MAX);
    if workers.get() <= request_cap {
        return workers;
    }
    PositiveUsize::try_from(request_cap).unwrap_or(workers)
}
