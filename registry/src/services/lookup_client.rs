//! Registry lookup client with fixed-delay retry on rate limiting

use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, ORIGIN, USER_AGENT};
use reqwest::StatusCode;
use tracing::{debug, error, warn};

use crate::error::{LookupError, LookupResult};
use crate::traits::RegistryClient;
use crate::types::{LookupResponse, RegistryConfig, RetryPolicy};

const ORIGIN_VALUE: &str = "https://websbor.rosstat.gov.ru";
const ACCEPT_VALUE: &str = "application/json, text/plain, */*";
const ACCEPT_LANGUAGE_VALUE: &str = "ru,en;q=0.9";
const USER_AGENT_VALUE: &str = "Mozilla/5.0 (Linux; Android 6.0; Nexus 5 Build/MRA58N) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Mobile Safari/537.36";

/// Real registry client backed by reqwest
pub struct RealRegistryClient {
    http: reqwest::Client,
    config: RegistryConfig,
}

impl RealRegistryClient {
    /// Create a client with the fixed header set and the configured timeout
    pub fn new(config: RegistryConfig) -> LookupResult<Self> {
        let http = reqwest::Client::builder()
            .default_headers(default_headers())
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| LookupError::Client {
                message: e.to_string(),
            })?;

        Ok(Self { http, config })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.config.retry
    }

    /// One request, no retry
    async fn send_once(&self, identifier: &str) -> LookupResult<LookupResponse> {
        let mut body = serde_json::Map::new();
        body.insert(
            self.config.identifier_field.clone(),
            serde_json::Value::String(identifier.to_string()),
        );

        let response = self
            .http
            .post(self.config.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(LookupError::from_transport)?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(LookupError::RateLimited { attempts: 1 });
        }
        if !status.is_success() {
            return Err(LookupError::Protocol {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(LookupError::from_transport)?;
        let body: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| LookupError::MalformedResponse {
                message: e.to_string(),
            })?;

        Ok(LookupResponse::new(body))
    }
}

#[async_trait]
impl RegistryClient for RealRegistryClient {
    async fn lookup(&self, identifier: &str) -> LookupResult<LookupResponse> {
        let policy = self.config.retry;
        let mut retries = 0u32;

        loop {
            debug!(identifier, attempt = retries + 1, "Sending registry lookup");

            match self.send_once(identifier).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_retryable() && retries < policy.max_retries => {
                    retries += 1;
                    warn!(
                        identifier,
                        "Too many requests. Retry {}/{} after {:?}",
                        retries,
                        policy.max_retries,
                        policy.retry_delay
                    );
                    tokio::time::sleep(policy.retry_delay).await;
                }
                Err(err) if err.is_retryable() => {
                    let err = LookupError::RateLimited {
                        attempts: retries + 1,
                    };
                    error!(identifier, error = %err, "Failed to retrieve the response after multiple retries");
                    return Err(err);
                }
                Err(err) => {
                    error!(identifier, error = %err, "Registry lookup failed");
                    return Err(err);
                }
            }
        }
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ORIGIN, HeaderValue::from_static(ORIGIN_VALUE));
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
    headers
}
