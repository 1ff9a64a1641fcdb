use crate::{
    config::ChatConfig,
    constants::QUERY_SUMMARY,
    errors::{describe_reqwest_error, ChatError, ChatResult},
    logging::log_api_call,
    models::{ApiCallLog, ErrorBody, QueryRequest, QueryResponse},
};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header, Client, StatusCode, Url};
use std::time::Instant;

/// What the query endpoint said, when it said anything at all.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// 2xx with a well-formed body.
    Answered(QueryResponse),
    /// Non-2xx. `message` is the body's `message` field when it had a usable
    /// one.
    Rejected {
        status_text: String,
        message: Option<String>,
    },
}

/// Sends one course question to the server.
///
/// `Err` is reserved for transport failures: unreachable host, a body that
/// could not be read, or a success body with the wrong shape.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    async fn query(&self, question: &str) -> ChatResult<QueryOutcome>;
}

/// `reqwest`-backed transport for `POST {base_url}/courses/{course_id}/query`.
#[derive(Debug, Clone)]
pub struct HttpQueryClient {
    client: Client,
    endpoint: Url,
    token: String,
}

impl HttpQueryClient {
    pub fn new(config: &ChatConfig) -> ChatResult<Self> {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &ChatConfig) -> ChatResult<Self> {
        Ok(Self {
            client,
            endpoint: config.query_url()?,
            token: config.token.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl QueryTransport for HttpQueryClient {
    async fn query(&self, question: &str) -> ChatResult<QueryOutcome> {
        let payload = QueryRequest {
            question: question.to_string(),
        };

        let start_time = Instant::now();
        let sent = self
            .client
            .post(self.endpoint.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                record_call(&self.endpoint, None, start_time);
                return Err(ChatError::transport_error(describe_reqwest_error(&e)));
            }
        };

        let status = response.status();
        record_call(&self.endpoint, Some(status), start_time);

        if !status.is_success() {
            // An unreadable error body is treated the same as one without a
            // message: the status text still gets shown.
            let body = response.bytes().await.unwrap_or_default();
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message_text().map(str::to_string));

            return Ok(QueryOutcome::Rejected {
                status_text: status_text(status),
                message,
            });
        }

        let body = response.bytes().await?;
        let parsed: QueryResponse = serde_json::from_slice(&body).map_err(|e| {
            ChatError::transport_error(format!("Failed to parse query response: {}", e))
        })?;

        Ok(QueryOutcome::Answered(parsed))
    }
}

/// Reason phrase for `status` ("Internal Server Error"), or the bare code
/// when there is none.
pub fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

fn record_call(endpoint: &Url, status: Option<StatusCode>, start_time: Instant) {
    log_api_call(&ApiCallLog {
        timestamp: Utc::now(),
        endpoint: endpoint.to_string(),
        request_summary: QUERY_SUMMARY.to_string(),
        response_status: status.map(|s| s.as_u16()),
        response_time_ms: start_time.elapsed().as_millis(),
    });
}
