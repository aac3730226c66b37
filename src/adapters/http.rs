use crate::domain::ports::ApiTransport;
use crate::utils::error::{AddressError, Result};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use url::Url;

/// 綁定 API 基底網址的 reqwest client
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| AddressError::config("api.base_url", format!("Invalid URL: {}", e)))?;

        // 確保 join 時保留基底路徑
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AddressError::validation("path", format!("Invalid request path {}: {}", path, e)))
    }

    async fn send(&self, request: RequestBuilder, authorization: &HeaderValue) -> Result<Value> {
        let response = request
            .header(AUTHORIZATION, authorization.clone())
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AddressError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl ApiTransport for ApiClient {
    async fn get(&self, path: &str, authorization: &HeaderValue) -> Result<Value> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);
        self.send(self.client.get(url), authorization).await
    }

    async fn post(&self, path: &str, body: &Value, authorization: &HeaderValue) -> Result<Value> {
        let url = self.endpoint(path)?;
        tracing::debug!("POST {}", url);
        self.send(self.client.post(url).json(body), authorization)
            .await
    }

    async fn delete(&self, path: &str, authorization: &HeaderValue) -> Result<Value> {
        let url = self.endpoint(path)?;
        tracing::debug!("DELETE {}", url);
        self.send(self.client.delete(url), authorization).await
    }
}
