use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Request};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::args::DEFAULT_USER_AGENT;
use crate::error::{AppError, AppResult, HttpError};
use crate::runner::LoadPlan;

use super::metrics::RequestMetrics;

/// Issues a single request against the target and reports its outcome.
///
/// Implementations must never fail the batch: transport-level problems
/// are absorbed into the returned [`RequestMetrics`].
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self) -> RequestMetrics;
}

/// Production executor: one client and one GET template per run.
pub struct HttpExecutor {
    client: Client,
    template: Request,
}

impl HttpExecutor {
    /// Builds the client and the request template for a run.
    ///
    /// # Errors
    ///
    /// Returns an error when the client or the request cannot be built.
    pub fn new(plan: &LoadPlan) -> AppResult<Self> {
        let mut client_builder = Client::builder()
            .timeout(plan.request_timeout)
            .connect_timeout(plan.connect_timeout)
            .user_agent(DEFAULT_USER_AGENT);

        if !plan.keep_alive {
            // A zero-size idle pool forces a fresh connection per request.
            client_builder = client_builder
                .pool_max_idle_per_host(0)
                .pool_idle_timeout(Some(Duration::from_secs(0)));
        }

        let client = client_builder
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;

        let mut request_builder = client.get(plan.url.clone());
        if plan.keep_alive {
            request_builder = request_builder.header("Connection", "keep-alive");
        }
        let template = request_builder
            .build()
            .map_err(|err| AppError::http(HttpError::BuildRequestFailed { source: err }))?;

        Ok(Self { client, template })
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self) -> RequestMetrics {
        let Some(request) = self.template.try_clone() else {
            warn!("Failed to clone request template.");
            return RequestMetrics::transport_failure(Duration::ZERO);
        };

        let start = Instant::now();
        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status().as_u16();
                match response.bytes().await {
                    Ok(body) => {
                        let elapsed = start.elapsed();
                        let content_length = u64::try_from(body.len()).unwrap_or(u64::MAX);
                        RequestMetrics::new(status, elapsed, content_length)
                    }
                    Err(err) => {
                        debug!("Failed to read response body: {}", err);
                        RequestMetrics::transport_failure(start.elapsed())
                    }
                }
            }
            Err(err) => {
                debug!("Request failed: {}", err);
                RequestMetrics::transport_failure(start.elapsed())
            }
        }
    }
}
