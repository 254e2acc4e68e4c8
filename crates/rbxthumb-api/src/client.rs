use crate::errors::{ApiError, HttpError, Result};
use async_trait::async_trait;
use log::{debug, error, trace};
use reqwest::header::ACCEPT;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("rbxthumb/", env!("CARGO_PKG_VERSION"));

/// Trait for providing configuration to the API client
/// This allows the main application to implement config without circular dependencies
pub trait ApiConfig {
    type Error;

    /// Base domain for endpoint URLs (optional, defaults to `roblox.com`)
    fn get_base_domain(&self) -> std::result::Result<Option<String>, Self::Error> {
        Ok(None)
    }

    /// Per-request timeout (optional, no timeout by default)
    fn get_timeout(&self) -> std::result::Result<Option<Duration>, Self::Error> {
        Ok(None)
    }

    /// User-Agent header value (optional)
    fn get_user_agent(&self) -> std::result::Result<Option<String>, Self::Error> {
        Ok(None)
    }
}

/// The HTTP capability the providers need: a GET with query parameters that
/// yields the decoded JSON body.
///
/// Implementations must report non-2xx statuses as [`ApiError::Http`].
#[async_trait]
pub trait HttpTransport: Send + Sync + fmt::Debug {
    async fn get(&self, url: &str, query: &[(&'static str, String)]) -> Result<Value>;
}

/// reqwest-backed transport used by default
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with the default user agent and no timeout
    pub fn new() -> Result<Self> {
        Self::with_settings(None, None)
    }

    /// Create a transport with an optional timeout and user agent
    pub fn with_settings(timeout: Option<Duration>, user_agent: Option<String>) -> Result<Self> {
        let user_agent = user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        debug!("Creating ReqwestTransport");
        debug!("  User-Agent: {}", user_agent);
        debug!("  Timeout: {:?}", timeout);

        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            error!("Failed to build HTTP client: {:?}", e);
            ApiError::Config(format!("failed to build HTTP client: {}", e))
        })?;

        Ok(Self { client })
    }

    /// Create a transport from any configuration implementing ApiConfig trait
    pub fn from_config<C>(config: &C) -> std::result::Result<Self, C::Error>
    where
        C: ApiConfig,
        C::Error: From<ApiError>,
    {
        debug!("Creating ReqwestTransport from config");
        let timeout = config.get_timeout()?;
        let user_agent = config.get_user_agent()?;

        Ok(Self::with_settings(timeout, user_agent)?)
    }

    /// Wrap an already configured reqwest client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Handle HTTP response and convert errors
    async fn handle_response(&self, response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            debug!("Request successful with status: {}", status);
            Ok(response)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            error!("Request failed with status: {}", status);
            debug!("Error response body: {}", error_text);

            Err(ApiError::Http(status_error(status, error_text)))
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, query: &[(&'static str, String)]) -> Result<Value> {
        debug!("HTTP GET request to: {}", url);
        trace!("Query parameters: {:?}", query);

        let response = self
            .client
            .get(url)
            .query(query)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!("GET request failed: {:?}", e);
                if e.is_timeout() {
                    HttpError::ClientTimeout
                } else {
                    HttpError::Request(e)
                }
            })?;

        debug!("Response status: {}", response.status());

        let response = self.handle_response(response).await?;
        response.json::<Value>().await.map_err(|e| {
            error!("Response body is not valid JSON: {:?}", e);
            ApiError::MalformedResponse(format!("response body is not valid JSON: {}", e))
        })
    }
}

/// Map a non-success status to the matching HttpError
fn status_error(status: StatusCode, message: String) -> HttpError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            error!("Rate limited (429 Too Many Requests)");
            HttpError::RateLimited { message }
        }
        StatusCode::SERVICE_UNAVAILABLE => {
            error!("Service unavailable (503)");
            HttpError::ServiceUnavailable { message }
        }
        StatusCode::REQUEST_TIMEOUT => {
            error!("Request timeout (408)");
            HttpError::Timeout { message }
        }
        _ => {
            error!("HTTP error with status code: {}", status.as_u16());
            HttpError::Status {
                status: status.as_u16(),
                message,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct TestConfig {
        timeout: Option<Duration>,
    }

    impl ApiConfig for TestConfig {
        type Error = ApiError;

        fn get_timeout(&self) -> std::result::Result<Option<Duration>, Self::Error> {
            Ok(self.timeout)
        }
    }

    #[test]
    fn test_status_error_mapping() {
        let body = r#"{"errors":[{"code":0,"message":"Too many requests"}]}"#;

        let err = status_error(StatusCode::TOO_MANY_REQUESTS, body.to_string());
        assert!(err.is_rate_limited());
        assert_eq!(err.status(), Some(429));
        assert!(err.to_string().contains("Too many requests"));

        let err = status_error(StatusCode::SERVICE_UNAVAILABLE, body.to_string());
        assert!(matches!(err, HttpError::ServiceUnavailable { .. }));
        assert_eq!(err.message(), Some(body));
        assert!(err.to_string().contains("Too many requests"));

        let err = status_error(StatusCode::REQUEST_TIMEOUT, "slow".to_string());
        assert!(matches!(err, HttpError::Timeout { .. }));
        assert_eq!(err.status(), Some(408));

        match status_error(StatusCode::BAD_REQUEST, "bad ids".to_string()) {
            HttpError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "bad ids");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_transport_from_config() {
        let config = TestConfig {
            timeout: Some(Duration::from_secs(5)),
        };
        assert!(ReqwestTransport::from_config(&config).is_ok());
        assert!(ReqwestTransport::new().is_ok());
    }

    #[test]
    fn test_default_user_agent() {
        assert!(DEFAULT_USER_AGENT.starts_with("rbxthumb/"));
    }

    #[tokio::test]
    async fn test_get_decodes_json_and_sends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/assets"))
            .and(query_param("assetIds", "1"))
            .and(query_param("size", "150x150"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let body = transport
            .get(
                &format!("{}/v1/assets", server.uri()),
                &[("assetIds", "1".to_string()), ("size", "150x150".to_string())],
            )
            .await
            .unwrap();

        assert_eq!(body, json!({"data": []}));
    }

    #[tokio::test]
    async fn test_get_keeps_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(503).set_body_string(r#"{"errors":[{"message":"Down"}]}"#),
            )
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let err = transport.get(&server.uri(), &[]).await.unwrap_err();

        assert_eq!(err.status(), Some(503));
        match err {
            ApiError::Http(HttpError::ServiceUnavailable { message }) => {
                assert!(message.contains("Down"))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_non_json_success_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let err = transport.get(&server.uri(), &[]).await.unwrap_err();

        assert!(matches!(err, ApiError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_get_client_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": []}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let transport =
            ReqwestTransport::with_settings(Some(Duration::from_millis(50)), None).unwrap();
        let err = transport.get(&server.uri(), &[]).await.unwrap_err();

        assert!(matches!(err, ApiError::Http(HttpError::ClientTimeout)));
        assert_eq!(err.status(), None);
    }
}
