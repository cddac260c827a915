pub mod toml_config;

use crate::core::render::{DEFAULT_MAX_PRODUCTS, DEFAULT_TITLE_MAX_CHARS};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_resource_locator};

pub const DEFAULT_PRODUCTS_URL: &str = "https://data-dawm.github.io/datum/reseller/products.json";
pub const DEFAULT_CATEGORIES_URL: &str =
    "https://data-dawm.github.io/datum/reseller/categories.xml";
pub const DEFAULT_OUTPUT_PATH: &str = "./output";

/// 任何 ConfigProvider 共用的檢查
pub fn validate_provider(config: &dyn ConfigProvider) -> Result<()> {
    validate_resource_locator("products_url", config.products_url(), config.base_url())?;
    validate_resource_locator("categories_url", config.categories_url(), config.base_url())?;
    validate_path("output_path", config.output_path())?;
    validate_range("max_products", config.max_products(), 1, 1000)?;
    validate_range("title_max_chars", config.title_max_chars(), 1, 500)?;
    if let Some(timeout) = config.timeout_seconds() {
        validate_range("timeout_seconds", timeout, 1, 3600)?;
    }
    Ok(())
}

#[cfg(feature = "cli")]
mod cli {
    use super::*;
    use crate::utils::validation::Validate;
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "catalog-page")]
    #[command(about = "Fetch the reseller catalog and render it into HTML fragments")]
    pub struct CliConfig {
        #[arg(long, default_value = DEFAULT_PRODUCTS_URL)]
        pub products_url: String,

        #[arg(long, default_value = DEFAULT_CATEGORIES_URL)]
        pub categories_url: String,

        #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
        pub output_path: String,

        #[arg(long, default_value_t = DEFAULT_MAX_PRODUCTS)]
        pub max_products: usize,

        #[arg(long, default_value_t = DEFAULT_TITLE_MAX_CHARS)]
        pub title_max_chars: usize,

        #[arg(long, help = "Whole-request timeout; no timeout when omitted")]
        pub timeout_seconds: Option<u64>,

        #[arg(long, help = "Base URL used to resolve relative resource locators")]
        pub base_url: Option<String>,

        #[arg(long, help = "Load settings from a TOML file instead of flags")]
        pub config: Option<String>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub json_logs: bool,
    }

    impl ConfigProvider for CliConfig {
        fn products_url(&self) -> &str {
            &self.products_url
        }

        fn categories_url(&self) -> &str {
            &self.categories_url
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn max_products(&self) -> usize {
            self.max_products
        }

        fn title_max_chars(&self) -> usize {
            self.title_max_chars
        }

        fn timeout_seconds(&self) -> Option<u64> {
            self.timeout_seconds
        }

        fn base_url(&self) -> Option<&str> {
            self.base_url.as_deref()
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_provider(self)
        }
    }

}

#[cfg(feature = "cli")]
pub use cli::CliConfig;
