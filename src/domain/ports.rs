use crate::domain::model::{CatalogSnapshot, HttpResponse, RenderedPage};
use crate::utils::error::{Result, TransportError};
use async_trait::async_trait;

/// 注入式 HTTP 能力：GET(url) -> {status, body}
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str) -> std::result::Result<HttpResponse, TransportError>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn products_url(&self) -> &str;
    fn categories_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn max_products(&self) -> usize;
    fn title_max_chars(&self) -> usize;
    fn timeout_seconds(&self) -> Option<u64>;
    fn base_url(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    fn output_path(&self) -> &str;
    async fn extract(&self) -> CatalogSnapshot;
    async fn transform(&self, snapshot: CatalogSnapshot) -> RenderedPage;
    async fn load(&self, page: &RenderedPage) -> Result<Vec<String>>;
}
