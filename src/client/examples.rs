//! The four client examples: GET, POST, PUT and DELETE against a remote
//! users API.

use std::time::Duration;

use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Request, StatusCode};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::ClientConfig;

const JSON: &str = "application/json";

/// Errors from a single example call.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to encode request body: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which example to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Example {
    Get,
    Post,
    Put,
    Delete,
}

impl Example {
    /// All examples in the order they run.
    pub const ALL: [Example; 4] = [Example::Get, Example::Post, Example::Put, Example::Delete];

    pub fn title(&self) -> &'static str {
        match self {
            Example::Get => "Example 1: GET Request",
            Example::Post => "Example 2: POST Request",
            Example::Put => "Example 3: PUT Request",
            Example::Delete => "Example 4: DELETE Request",
        }
    }
}

/// User payload sent by the POST and PUT examples.
#[derive(Debug, Clone, Serialize)]
pub struct UserPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub email: String,
    pub username: String,
}

impl UserPayload {
    pub fn new_user() -> Self {
        Self {
            id: None,
            name: "Kat Perreira".into(),
            email: "kat@example.com".into(),
            username: "katperreira".into(),
        }
    }

    pub fn updated_user() -> Self {
        Self {
            id: Some(1),
            name: "Kat Perreira Updated".into(),
            email: "kat.updated@example.com".into(),
            username: "katperreira".into(),
        }
    }
}

/// A finished request/response pair.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub method: Method,
    pub url: Url,
    pub request_headers: HeaderMap,
    pub request_body: Option<String>,
    pub status: StatusCode,
    pub response_headers: HeaderMap,
    pub response_body: String,
}

impl Exchange {
    /// Response body as JSON, if it is JSON.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.response_body).ok()
    }

    /// Response body pretty-printed when it is JSON, raw otherwise.
    pub fn pretty_body(&self) -> String {
        self.json()
            .and_then(|v| serde_json::to_string_pretty(&v).ok())
            .unwrap_or_else(|| self.response_body.clone())
    }
}

/// Client for the remote users API.
#[derive(Debug, Clone)]
pub struct ExampleClient {
    client: Client,
    base_url: Url,
    user_agent: String,
}

impl ExampleClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(&config.base_url)?;
        // Url::join replaces the last segment unless the base ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        // Title-case names: the toy server matches `Content-Length` exactly
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .http1_title_case_headers()
            .build()?;

        Ok(Self {
            client,
            base_url,
            user_agent: config.user_agent.clone(),
        })
    }

    /// Absolute URL for a path relative to the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Build the request for an example without sending it.
    pub fn build(&self, example: Example) -> Result<Request, ClientError> {
        let request = match example {
            Example::Get => self
                .client
                .get(self.endpoint("users/1")?)
                .header(ACCEPT, JSON)
                .header(USER_AGENT, &self.user_agent),
            Example::Post => self
                .client
                .post(self.endpoint("users")?)
                .header(CONTENT_TYPE, JSON)
                .header(ACCEPT, JSON)
                .body(serde_json::to_string(&UserPayload::new_user())?),
            Example::Put => self
                .client
                .put(self.endpoint("users/1")?)
                .header(CONTENT_TYPE, JSON)
                .body(serde_json::to_string(&UserPayload::updated_user())?),
            Example::Delete => self.client.delete(self.endpoint("users/1")?),
        };
        Ok(request.build()?)
    }

    /// Build, send and fully read one example.
    pub async fn send(&self, example: Example) -> Result<Exchange, ClientError> {
        let request = self.build(example)?;
        let method = request.method().clone();
        let url = request.url().clone();
        let request_headers = request.headers().clone();
        let request_body = request
            .body()
            .and_then(|b| b.as_bytes())
            .map(|b| String::from_utf8_lossy(b).into_owned());

        tracing::debug!(method = %method, url = %url, "Sending example request");
        let response = self.client.execute(request).await?;

        let status = response.status();
        let response_headers = response.headers().clone();
        let response_body = response.text().await?;
        tracing::debug!(method = %method, url = %url, status = status.as_u16(), "Example response received");

        Ok(Exchange {
            method,
            url,
            request_headers,
            request_body,
            status,
            response_headers,
            response_body,
        })
    }

    /// Run one example and print it. Errors are printed, not returned.
    pub async fn run(&self, example: Example) -> Result<Exchange, ClientError> {
        println!("\n--- {} ---", example.title());
        let result = self.send(example).await;
        match &result {
            Ok(exchange) => print_exchange(example, exchange),
            Err(e) => {
                tracing::warn!(example = ?example, error = %e, "Example failed");
                println!("Error: {e}");
            }
        }
        result
    }

    /// Run every example in order. A failure does not stop the rest.
    pub async fn run_all(&self) -> Vec<(Example, Result<Exchange, ClientError>)> {
        let mut results = Vec::with_capacity(Example::ALL.len());
        for example in Example::ALL {
            results.push((example, self.run(example).await));
        }
        results
    }
}

fn print_exchange(example: Example, exchange: &Exchange) {
    println!("Sending {} request to: {}", exchange.method, exchange.url);
    match example {
        Example::Get => println!("Headers: {}", format_headers_inline(&exchange.request_headers)),
        Example::Post | Example::Put => {
            println!("Request Body: {}", exchange.request_body.as_deref().unwrap_or(""));
        }
        Example::Delete => {}
    }

    println!(
        "\nResponse Status: {} {}",
        exchange.status.as_u16(),
        exchange.status.canonical_reason().unwrap_or("")
    );

    match example {
        Example::Get => {
            println!("Response Headers:");
            for (key, value) in &exchange.response_headers {
                println!("  {}: {}", key, value.to_str().unwrap_or("<binary>"));
            }
            println!("\nResponse Body:");
            println!("{}", exchange.pretty_body());
        }
        Example::Post | Example::Put => {
            println!("Response Body:");
            println!("{}", exchange.pretty_body());
        }
        Example::Delete => {
            if exchange.status == StatusCode::OK {
                println!("Resource deleted successfully!");
            }
        }
    }
}

fn format_headers_inline(headers: &HeaderMap) -> String {
    let pairs: Vec<String> = headers
        .iter()
        .map(|(k, v)| format!("{}: {}", k, v.to_str().unwrap_or("<binary>")))
        .collect();
    format!("{{{}}}", pairs.join(", "))
}
