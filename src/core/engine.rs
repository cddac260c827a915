use crate::domain::model::PageReport;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct PageEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> PageEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<PageReport> {
        tracing::info!("Starting catalog page build...");

        // Extract
        let snapshot = self.pipeline.extract().await;
        tracing::info!(
            "Fetched products: {}, categories: {}",
            outcome(snapshot.products.is_success()),
            outcome(snapshot.categories.is_success())
        );

        // Transform
        let page = self.pipeline.transform(snapshot).await;
        tracing::info!(
            "Rendered {} products and {} categories",
            page.product_count,
            page.category_count
        );

        // Load
        let written_files = self.pipeline.load(&page).await?;
        if written_files.is_empty() {
            tracing::warn!("⚠️ Nothing was rendered, no files written");
        }

        Ok(PageReport {
            output_path: self.pipeline.output_path().to_string(),
            product_count: page.product_count,
            category_count: page.category_count,
            written_files,
        })
    }
}

fn outcome(success: bool) -> &'static str {
    if success {
        "ok"
    } else {
        "failed"
    }
}
