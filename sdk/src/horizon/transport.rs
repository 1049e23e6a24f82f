//! The HTTP seam under [`super::Server`].
//!
//! The server only ever needs two requests, so the transport is a two-method
//! trait. [`HttpTransport`] is the reqwest implementation; tests swap in an
//! in-memory one.

use async_trait::async_trait;
use reqwest::{Client, Request};
use tracing::{debug, warn};

use super::error::HorizonError;
use crate::config::HTTP_TIMEOUT;

/// Status and raw body of a Horizon response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body on 2xx, the classified error otherwise.
    pub fn into_success(self) -> Result<String, HorizonError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(HorizonError::from_status(self.status, &self.body))
        }
    }
}

#[async_trait]
pub trait HorizonTransport: Send + Sync {
    /// `POST /transactions` with `tx=<envelope xdr>`.
    async fn submit(&self, envelope_xdr: &str) -> Result<HttpReply, HorizonError>;

    /// `GET /accounts/{account_id}`.
    async fn account(&self, account_id: &str) -> Result<HttpReply, HorizonError>;
}

// ---------------------------------------------------------------------------
// reqwest transport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    http: Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Result<Self, HorizonError> {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(HorizonError::from)?;
        Ok(Self::with_client(base_url, http))
    }

    /// Uses a preconfigured client (proxies, custom timeouts, ...).
    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /transactions`, form-encoded. Base64 XDR carries `+`, `/` and
    /// `=`, which reqwest escapes.
    fn submit_request(&self, envelope_xdr: &str) -> Result<Request, HorizonError> {
        let url = format!("{}/transactions", self.base_url);
        Ok(self.http.post(url).form(&[("tx", envelope_xdr)]).build()?)
    }

    async fn read(response: reqwest::Response) -> Result<HttpReply, HorizonError> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        if !(200..300).contains(&status) {
            warn!(status, "horizon returned an error status");
        }
        Ok(HttpReply { status, body })
    }
}

#[async_trait]
impl HorizonTransport for HttpTransport {
    async fn submit(&self, envelope_xdr: &str) -> Result<HttpReply, HorizonError> {
        let request = self.submit_request(envelope_xdr)?;
        let url = request.url().clone();
        debug!(%url, "submitting transaction");
        let response = self.http.execute(request).await.map_err(|e| {
            warn!(error = %e, %url, "submission request failed");
            HorizonError::from(e)
        })?;
        Self::read(response).await
    }

    async fn account(&self, account_id: &str) -> Result<HttpReply, HorizonError> {
        let url = format!("{}/accounts/{}", self.base_url, account_id);
        debug!(%url, "loading account");
        let response = self.http.get(&url).send().await.map_err(|e| {
            warn!(error = %e, %url, "account request failed");
            HorizonError::from(e)
        })?;
        Self::read(response).await
    }
}

impl From<reqwest::Error> for HorizonError {
    fn from(err: reqwest::Error) -> Self {
        HorizonError::Connection(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use reqwest::header::CONTENT_TYPE;

    #[test]
    fn submit_is_a_form_post_with_escaped_xdr() {
        let transport = HttpTransport::new("https://horizon-testnet.stellar.org").unwrap();
        let request = transport.submit_request("AAAA+b/c==").unwrap();
        assert_eq!(request.method(), &reqwest::Method::POST);
        assert_eq!(
            request.url().as_str(),
            "https://horizon-testnet.stellar.org/transactions"
        );
        assert_eq!(
            request.headers()[CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, b"tx=AAAA%2Bb%2Fc%3D%3D");
    }

    #[test]
    fn reply_classification() {
        assert_eq!(HttpReply::new(200, "{}").into_success().unwrap(), "{}");
        assert!(matches!(
            HttpReply::new(404, "").into_success(),
            Err(HorizonError::NotFound(_))
        ));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let transport = HttpTransport::new("https://horizon-testnet.stellar.org/").unwrap();
        assert_eq!(transport.base_url(), "https://horizon-testnet.stellar.org");
    }
}
