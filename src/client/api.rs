use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with a non-2xx status.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        detail: Option<String>,
    },

    /// Connection failure or an undecodable response.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusKind {
    #[default]
    Neutral,
    Success,
    Error,
}

/// The one-line status shown next to a form or above the results table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusLine {
    pub fn neutral(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.kind = StatusKind::Neutral;
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.kind = StatusKind::Success;
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.kind = StatusKind::Error;
    }

    pub fn clear(&mut self) {
        self.neutral("");
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

/// JSON-over-HTTP access to the query service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// GET `endpoint` and decode the JSON body. Failures are written to
    /// `status` and reported as `None`.
    pub async fn fetch_data(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        status: &mut StatusLine,
    ) -> Option<Value> {
        status.neutral("Loading...");
        match self.get_json(endpoint, query).await {
            Ok(value) => {
                status.clear();
                Some(value)
            }
            Err(e) => {
                log::error!("GET {} failed: {}", endpoint, e);
                status.error(format!("Error: {e}"));
                None
            }
        }
    }

    /// POST `body` as JSON. The outcome is written to `status`; errors are
    /// also returned so the caller can react.
    pub async fn post_data<B>(
        &self,
        endpoint: &str,
        body: &B,
        status: &mut StatusLine,
    ) -> Result<Value, ClientError>
    where
        B: Serialize + ?Sized,
    {
        status.neutral("Sending data...");
        let result = self.post_json(endpoint, body).await;
        match &result {
            Ok(value) => status.success(
                value
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("Operation succeeded."),
            ),
            Err(ClientError::Api {
                message, detail, ..
            }) => {
                let mut text = format!("API error: {message}");
                if let Some(detail) = detail {
                    text.push_str(&format!(" Details: {detail}"));
                }
                status.error(text);
            }
            Err(e) => status.error(format!("Network or client error: {e}")),
        }
        if let Err(e) = &result {
            log::error!("POST {} failed: {}", endpoint, e);
        }
        result
    }

    async fn get_json(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Value, ClientError> {
        let resp = self.http.get(self.url(endpoint)).query(query).send().await?;
        let status = resp.status();
        if !status.is_success() {
            // An error body that is not JSON falls back to the reason phrase.
            let body = resp.json::<Value>().await.ok();
            return Err(api_error(status, body.as_ref()));
        }
        Ok(resp.json().await?)
    }

    async fn post_json<B>(&self, endpoint: &str, body: &B) -> Result<Value, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let resp = self.http.post(self.url(endpoint)).json(body).send().await?;
        let status = resp.status();
        let data: Value = resp.json().await?;
        if !status.is_success() {
            return Err(api_error(status, Some(&data)));
        }
        Ok(data)
    }
}

fn api_error(status: StatusCode, body: Option<&Value>) -> ClientError {
    let message = body
        .and_then(|b| b.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| format!("HTTP error: {}", status.as_u16()));
    let detail = body
        .and_then(|b| b.get("errorDetail"))
        .and_then(Value::as_str)
        .map(str::to_string);
    ClientError::Api {
        status: status.as_u16(),
        message,
        detail,
    }
}
