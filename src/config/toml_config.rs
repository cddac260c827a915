use crate::config::{validate_provider, DEFAULT_CATEGORIES_URL, DEFAULT_OUTPUT_PATH, DEFAULT_PRODUCTS_URL};
use crate::core::render::{DEFAULT_MAX_PRODUCTS, DEFAULT_TITLE_MAX_CHARS};
use crate::core::ConfigProvider;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_products_url")]
    pub products_url: String,
    #[serde(default = "default_categories_url")]
    pub categories_url: String,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub max_products: Option<usize>,
    pub title_max_chars: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

fn default_products_url() -> String {
    DEFAULT_PRODUCTS_URL.to_string()
}

fn default_categories_url() -> String {
    DEFAULT_CATEGORIES_URL.to_string()
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            products_url: default_products_url(),
            categories_url: default_categories_url(),
            base_url: None,
            timeout_seconds: None,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_products: Some(DEFAULT_MAX_PRODUCTS),
            title_max_chars: Some(DEFAULT_TITLE_MAX_CHARS),
        }
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_HOST})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn products_url(&self) -> &str {
        &self.source.products_url
    }

    fn categories_url(&self) -> &str {
        &self.source.categories_url
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn max_products(&self) -> usize {
        self.render.max_products.unwrap_or(DEFAULT_MAX_PRODUCTS)
    }

    fn title_max_chars(&self) -> usize {
        self.render.title_max_chars.unwrap_or(DEFAULT_TITLE_MAX_CHARS)
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.source.timeout_seconds
    }

    fn base_url(&self) -> Option<&str> {
        self.source.base_url.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
