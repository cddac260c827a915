use crate::domain::model::HttpResponse;
use crate::domain::ports::HttpTransport;
use crate::utils::error::{Result, TransportError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// reqwest 實作的 HTTP transport
///
/// 預設沒有逾時；`with_timeout` 設定整個請求的上限。
/// 設定 base URL 後，相對路徑會以它為基準解析。
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Option<Url>,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TransportError::from)?;
        Ok(Self {
            client,
            base_url: None,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(TransportError::from)?;
        self.base_url = Some(parsed);
        Ok(self)
    }

    fn resolve(&self, url: &str) -> std::result::Result<Url, TransportError> {
        match &self.base_url {
            Some(base) => Ok(base.join(url)?),
            None => Ok(Url::parse(url)?),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> std::result::Result<HttpResponse, TransportError> {
        let target = self.resolve(url)?;
        tracing::debug!("Making GET request to: {}", target);

        let response = self.client.get(target).send().await?;
        let status = response.status();

        // 非 2xx 不讀取內容，由 fetcher 產生錯誤訊息
        if !status.is_success() {
            return Ok(HttpResponse::new(status.as_u16(), String::new()));
        }

        let body = response.text().await?;
        Ok(HttpResponse::new(status.as_u16(), body))
    }
}
