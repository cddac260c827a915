use crate::core::fetch::{fetch_json, fetch_xml, FetchResult};
use crate::core::render;
use crate::core::xml::XmlDocument;
use crate::domain::model::{CatalogSnapshot, RenderedPage};
use crate::domain::ports::{ConfigProvider, HttpTransport, Pipeline, Storage};
use crate::utils::error::Result;

pub const PRODUCTS_FILE: &str = "products.html";
pub const CATEGORIES_FILE: &str = "categories.html";

/// 商品記錄保持未解碼，渲染時才逐筆轉成 `Product`
pub async fn fetch_products<H>(transport: &H, url: &str) -> FetchResult<Vec<serde_json::Value>>
where
    H: HttpTransport + ?Sized,
{
    fetch_json(transport, url).await
}

pub async fn fetch_categories<H>(transport: &H, url: &str) -> FetchResult<XmlDocument>
where
    H: HttpTransport + ?Sized,
{
    fetch_xml(transport, url).await
}

/// 商品與分類頁面的 pipeline：抓取 -> 渲染 -> 寫出 HTML 片段
pub struct CatalogPipeline<H: HttpTransport, S: Storage, C: ConfigProvider> {
    transport: H,
    storage: S,
    config: C,
}

impl<H: HttpTransport, S: Storage, C: ConfigProvider> CatalogPipeline<H, S, C> {
    pub fn new(transport: H, storage: S, config: C) -> Self {
        Self {
            transport,
            storage,
            config,
        }
    }
}

#[async_trait::async_trait]
impl<H: HttpTransport, S: Storage, C: ConfigProvider> Pipeline for CatalogPipeline<H, S, C> {
    fn output_path(&self) -> &str {
        self.config.output_path()
    }

    async fn extract(&self) -> CatalogSnapshot {
        tracing::debug!(
            "Fetching products from {} and categories from {}",
            self.config.products_url(),
            self.config.categories_url()
        );

        // 兩個來源互相獨立，同時抓取
        let (products, categories) = tokio::join!(
            fetch_products(&self.transport, self.config.products_url()),
            fetch_categories(&self.transport, self.config.categories_url()),
        );

        CatalogSnapshot {
            products,
            categories,
        }
    }

    async fn transform(&self, snapshot: CatalogSnapshot) -> RenderedPage {
        let mut page = RenderedPage::default();

        match snapshot.products {
            FetchResult::Success(records) => {
                let decoded = render::decode_products(&records, self.config.max_products());
                if let Some(e) = &decoded.error {
                    tracing::warn!(
                        "⚠️ Stopped rendering products after {} cards: {}",
                        decoded.items.len(),
                        e
                    );
                }
                page.products_html = Some(render::render_products(
                    &decoded.items,
                    self.config.title_max_chars(),
                ));
                page.product_count = decoded.items.len();
                tracing::debug!(
                    "Rendered {} of {} products",
                    page.product_count,
                    records.len()
                );
            }
            FetchResult::Failure(message) => {
                tracing::warn!("⚠️ Skipping products section: {}", message);
            }
        }

        match snapshot.categories {
            FetchResult::Success(document) => {
                let decoded = render::categories_from_document(&document);
                if let Some(e) = &decoded.error {
                    tracing::warn!(
                        "⚠️ Stopped rendering categories after {} options: {}",
                        decoded.items.len(),
                        e
                    );
                }
                page.categories_html = Some(render::render_category_options(&decoded.items));
                page.category_count = decoded.items.len();
                tracing::debug!("Rendered {} categories", decoded.items.len());
            }
            FetchResult::Failure(message) => {
                tracing::warn!("⚠️ Could not load categories: {}", message);
            }
        }

        page
    }

    async fn load(&self, page: &RenderedPage) -> Result<Vec<String>> {
        let mut written = Vec::new();

        if let Some(html) = &page.products_html {
            self.storage.write_file(PRODUCTS_FILE, html.as_bytes()).await?;
            written.push(PRODUCTS_FILE.to_string());
        }

        if let Some(html) = &page.categories_html {
            self.storage.write_file(CATEGORIES_FILE, html.as_bytes()).await?;
            written.push(CATEGORIES_FILE.to_string());
        }

        tracing::debug!("Wrote {} files to {}", written.len(), self.config.output_path());
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::HttpResponse;
    use crate::utils::error::TransportError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<String> {
            let files = self.files.lock().await;
            files
                .get(path)
                .map(|data| String::from_utf8_lossy(data).into_owned())
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                crate::utils::error::CatalogError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct RoutedTransport {
        routes: HashMap<String, HttpResponse>,
    }

    #[async_trait]
    impl HttpTransport for RoutedTransport {
        async fn get(&self, url: &str) -> std::result::Result<HttpResponse, TransportError> {
            self.routes
                .get(url)
                .cloned()
                .ok_or_else(|| TransportError::other(format!("no route to {}", url)))
        }
    }

    struct TestConfig;

    impl ConfigProvider for TestConfig {
        fn products_url(&self) -> &str {
            "mem://products.json"
        }
        fn categories_url(&self) -> &str {
            "mem://categories.xml"
        }
        fn output_path(&self) -> &str {
            "./test-output"
        }
        fn max_products(&self) -> usize {
            2
        }
        fn title_max_chars(&self) -> usize {
            20
        }
        fn timeout_seconds(&self) -> Option<u64> {
            None
        }
        fn base_url(&self) -> Option<&str> {
            None
        }
    }

    fn products_json() -> String {
        serde_json::json!([
            {"id": 1, "title": "Kindle Paperwhite", "price": 139.99, "imgUrl": "k.jpg", "productURL": "k", "category_id": 1},
            {"id": 2, "title": "Echo Dot", "price": 49.0, "imgUrl": "e.jpg", "productURL": "e", "category_id": 2},
            {"id": 3, "title": "Fire TV Stick", "price": 39.99, "imgUrl": "f.jpg", "productURL": "f", "category_id": 2}
        ])
        .to_string()
    }

    fn transport(categories: HttpResponse) -> RoutedTransport {
        let mut routes = HashMap::new();
        routes.insert(
            "mem://products.json".to_string(),
            HttpResponse::new(200, products_json()),
        );
        routes.insert("mem://categories.xml".to_string(), categories);
        RoutedTransport { routes }
    }

    #[tokio::test]
    async fn test_full_page_renders_both_sections() {
        let storage = MockStorage::new();
        let pipeline = CatalogPipeline::new(
            transport(HttpResponse::new(
                200,
                "<categories><category><id>1</id><name>Books</name></category></categories>",
            )),
            storage.clone(),
            TestConfig,
        );

        let snapshot = pipeline.extract().await;
        assert!(snapshot.products.is_success());
        assert!(snapshot.categories.is_success());

        let page = pipeline.transform(snapshot).await;
        assert_eq!(page.product_count, 2);
        assert_eq!(page.category_count, 1);

        let written = pipeline.load(&page).await.unwrap();
        assert_eq!(written, vec![PRODUCTS_FILE, CATEGORIES_FILE]);

        let products = storage.get_file(PRODUCTS_FILE).await.unwrap();
        assert!(products.contains("Kindle Paperwhite"));
        assert!(products.contains("$49"));
        assert!(!products.contains("Fire TV Stick"));

        let categories = storage.get_file(CATEGORIES_FILE).await.unwrap();
        assert!(categories.ends_with(r#"<option value="1">Books</option>"#));
    }

    #[tokio::test]
    async fn test_failed_section_is_skipped() {
        let storage = MockStorage::new();
        let pipeline = CatalogPipeline::new(
            transport(HttpResponse::new(503, "")),
            storage.clone(),
            TestConfig,
        );

        let snapshot = pipeline.extract().await;
        assert_eq!(
            snapshot.categories,
            FetchResult::Failure("ERROR HTTP: 503".to_string())
        );

        let page = pipeline.transform(snapshot).await;
        assert!(page.products_html.is_some());
        assert!(page.categories_html.is_none());

        let written = pipeline.load(&page).await.unwrap();
        assert_eq!(written, vec![PRODUCTS_FILE]);
        assert!(storage.get_file(CATEGORIES_FILE).await.is_none());
    }

    #[tokio::test]
    async fn test_incomplete_category_keeps_placeholder() {
        let pipeline = CatalogPipeline::new(
            transport(HttpResponse::new(
                200,
                "<categories>\
                   <category><id>1</id><name>Books</name></category>\
                   <category><name>Music</name></category>\
                 </categories>",
            )),
            MockStorage::new(),
            TestConfig,
        );

        let page = pipeline.transform(pipeline.extract().await).await;
        assert_eq!(
            page.categories_html.as_deref(),
            Some(
                "<option selected disabled>Seleccione una categoría</option>\
                 <option value=\"1\">Books</option>"
            )
        );
        assert_eq!(page.category_count, 1);
    }

    #[tokio::test]
    async fn test_bad_product_record_keeps_earlier_cards() {
        let mut routes = HashMap::new();
        routes.insert(
            "mem://products.json".to_string(),
            HttpResponse::new(
                200,
                serde_json::json!([
                    {"title": "Kindle Paperwhite", "price": "139.99", "imgUrl": "k.jpg", "category_id": 1},
                    {"title": null, "price": 49.0, "imgUrl": "e.jpg", "category_id": 2}
                ])
                .to_string(),
            ),
        );
        routes.insert(
            "mem://categories.xml".to_string(),
            HttpResponse::new(200, "<categories/>"),
        );
        let pipeline = CatalogPipeline::new(RoutedTransport { routes }, MockStorage::new(), TestConfig);

        let page = pipeline.transform(pipeline.extract().await).await;
        let html = page.products_html.unwrap();
        assert_eq!(page.product_count, 1);
        assert!(html.contains("$139.99"));
        assert_eq!(html.matches("rounded-2xl shadow").count(), 1);
    }
}
