//! Kill Bill REST client.
//!
//! Implements the `BillingPlatform` port against the tenant push notification
//! endpoint (`/1.0/kb/tenants/registerNotificationCallback`).
//!
//! # Authentication
//!
//! Every request carries HTTP basic auth plus the tenant's
//! `X-Killbill-ApiKey` / `X-Killbill-ApiSecret`. Write requests add the
//! audit headers `X-Killbill-CreatedBy` and, when set, `X-Killbill-Reason`
//! and `X-Killbill-Comment`.
//!
//! # Configuration
//!
//! ```ignore
//! let client = KillBillClient::new(&config.killbill)?;
//! let header = config.killbill.tenant_header();
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::config::KillBillConfig;
use crate::domain::subscription::{CallbackUrl, PushNotificationView};
use crate::ports::{BillingPlatform, PlatformError, TenantHeader};

const PUSH_NOTIFICATION_PATH: &str = "/1.0/kb/tenants/registerNotificationCallback";

const HEADER_API_KEY: &str = "X-Killbill-ApiKey";
const HEADER_API_SECRET: &str = "X-Killbill-ApiSecret";
const HEADER_CREATED_BY: &str = "X-Killbill-CreatedBy";
const HEADER_REASON: &str = "X-Killbill-Reason";
const HEADER_COMMENT: &str = "X-Killbill-Comment";

/// Kill Bill billing platform adapter.
pub struct KillBillClient {
    api_url: String,
    username: String,
    password: SecretString,
    http_client: reqwest::Client,
}

impl KillBillClient {
    /// Create a client with the configured credentials and request timeout.
    pub fn new(config: &KillBillConfig) -> Result<Self, PlatformError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PlatformError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: SecretString::new(config.password.clone()),
            http_client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.api_url, PUSH_NOTIFICATION_PATH)
    }

    fn request(
        &self,
        method: reqwest::Method,
        header: &TenantHeader,
        audited: bool,
    ) -> reqwest::RequestBuilder {
        let mut request = self
            .http_client
            .request(method, self.endpoint())
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .header(HEADER_API_KEY, header.api_key())
            .header(HEADER_API_SECRET, header.api_secret())
            .header(reqwest::header::ACCEPT, "application/json");

        if audited {
            request = request.header(HEADER_CREATED_BY, header.created_by());
            if let Some(reason) = header.reason() {
                request = request.header(HEADER_REASON, reason);
            }
            if let Some(comment) = header.comment() {
                request = request.header(HEADER_COMMENT, comment);
            }
        }

        request
    }

    /// Send a request and turn transport failures and non-2xx answers into
    /// `PlatformError`.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        operation: &'static str,
    ) -> Result<reqwest::Response, PlatformError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Kill Bill request failed");
            if e.is_timeout() {
                PlatformError::timeout(e.to_string())
            } else {
                PlatformError::network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        tracing::error!(
            operation,
            status = status.as_u16(),
            error = %error_text,
            "Kill Bill returned an error"
        );

        let err = match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                PlatformError::authentication(format!("Kill Bill rejected credentials: {}", error_text))
            }
            _ => PlatformError::provider(format!("Kill Bill API error: {}", error_text)),
        };
        Err(err.with_upstream_status(status.as_u16()))
    }
}

#[async_trait]
impl BillingPlatform for KillBillClient {
    async fn create_push_notification(
        &self,
        header: &TenantHeader,
        callback_url: &CallbackUrl,
    ) -> Result<(), PlatformError> {
        let request = self
            .request(reqwest::Method::POST, header, true)
            .query(&[("cb", callback_url.as_str())]);

        self.send(request, "create_push_notification").await?;
        tracing::debug!(callback_url = %callback_url, "Kill Bill push notification created");
        Ok(())
    }

    async fn retrieve_push_notifications(
        &self,
        header: &TenantHeader,
    ) -> Result<PushNotificationView, PlatformError> {
        let request = self.request(reqwest::Method::GET, header, false);
        let response = self.send(request, "retrieve_push_notifications").await?;

        let raw: Value = response.json().await.map_err(|e| {
            PlatformError::invalid_response(format!("Failed to parse Kill Bill response: {}", e))
        })?;

        Ok(PushNotificationView::new(raw))
    }

    async fn delete_push_notification(&self, header: &TenantHeader) -> Result<(), PlatformError> {
        let request = self.request(reqwest::Method::DELETE, header, true);
        self.send(request, "delete_push_notification").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PlatformErrorCode;
    use httpmock::prelude::*;
    use serde_json::json;

    // "admin:password"
    const BASIC_AUTH: &str = "Basic YWRtaW46cGFzc3dvcmQ=";

    fn config(api_url: String) -> KillBillConfig {
        KillBillConfig {
            api_url,
            username: "admin".to_string(),
            password: "password".to_string(),
            api_key: "bob".to_string(),
            api_secret: "lazar".to_string(),
            ..Default::default()
        }
    }

    fn header() -> TenantHeader {
        TenantHeader::new("bob", "lazar", "admin").with_reason("gateway")
    }

    #[tokio::test]
    async fn create_sends_callback_and_tenant_headers() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path(PUSH_NOTIFICATION_PATH)
                .query_param("cb", "http://gateway:5000/listeners/kb_callback")
                .header("authorization", BASIC_AUTH)
                .header("x-killbill-apikey", "bob")
                .header("x-killbill-apisecret", "lazar")
                .header("x-killbill-createdby", "admin")
                .header("x-killbill-reason", "gateway");
            then.status(201);
        });

        let client = KillBillClient::new(&config(server.base_url())).unwrap();
        let callback = CallbackUrl::parse("http://gateway:5000/listeners/kb_callback").unwrap();
        client
            .create_push_notification(&header(), &callback)
            .await
            .unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn retrieve_returns_raw_document() {
        let server = MockServer::start_async().await;
        let body = json!({
            "key": "PUSH_NOTIFICATION_CB",
            "values": ["http://gateway:5000/listeners/kb_callback"],
            "auditLogs": []
        });
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path(PUSH_NOTIFICATION_PATH)
                .header("x-killbill-apikey", "bob");
            then.status(200).json_body(body.clone());
        });

        let client = KillBillClient::new(&config(server.base_url())).unwrap();
        let view = client.retrieve_push_notifications(&header()).await.unwrap();

        mock.assert();
        assert_eq!(view.raw(), &body);
        assert!(view.contains("http://gateway:5000/listeners/kb_callback"));
    }

    #[tokio::test]
    async fn delete_succeeds_on_no_content() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(DELETE)
                .path(PUSH_NOTIFICATION_PATH)
                .header("x-killbill-createdby", "admin");
            then.status(204);
        });

        let client = KillBillClient::new(&config(server.base_url())).unwrap();
        client.delete_push_notification(&header()).await.unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn trailing_slash_in_api_url_is_ignored() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(DELETE).path(PUSH_NOTIFICATION_PATH);
            then.status(204);
        });

        let client = KillBillClient::new(&config(format!("{}/", server.base_url()))).unwrap();
        client.delete_push_notification(&header()).await.unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn unauthorized_maps_to_authentication_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path(PUSH_NOTIFICATION_PATH);
            then.status(401);
        });

        let client = KillBillClient::new(&config(server.base_url())).unwrap();
        let err = client.retrieve_push_notifications(&header()).await.unwrap_err();

        assert_eq!(err.code, PlatformErrorCode::AuthenticationError);
        assert_eq!(err.upstream_status, Some(401));
    }

    #[tokio::test]
    async fn server_error_maps_to_provider_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path(PUSH_NOTIFICATION_PATH);
            then.status(500).body("boom");
        });

        let client = KillBillClient::new(&config(server.base_url())).unwrap();
        let callback = CallbackUrl::parse("http://gateway/cb").unwrap();
        let err = client
            .create_push_notification(&header(), &callback)
            .await
            .unwrap_err();

        assert_eq!(err.code, PlatformErrorCode::ProviderError);
        assert!(err.message.contains("boom"));
    }

    #[tokio::test]
    async fn unparseable_retrieve_body_is_invalid_response() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path(PUSH_NOTIFICATION_PATH);
            then.status(200).body("<html>");
        });

        let client = KillBillClient::new(&config(server.base_url())).unwrap();
        let err = client.retrieve_push_notifications(&header()).await.unwrap_err();

        assert_eq!(err.code, PlatformErrorCode::InvalidResponse);
    }

    #[tokio::test]
    async fn unreachable_platform_is_network_error() {
        // Nothing listens on port 9 in the test environment.
        let client = KillBillClient::new(&config("http://127.0.0.1:9".to_string())).unwrap();
        let err = client.retrieve_push_notifications(&header()).await.unwrap_err();

        assert_eq!(err.code, PlatformErrorCode::NetworkError);
    }
}
