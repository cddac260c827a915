pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{http::ReqwestTransport, storage::LocalStorage};
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::{
    engine::PageEngine,
    fetch::{fetch_json, fetch_xml, FetchResult},
    pipeline::{fetch_categories, fetch_products, CatalogPipeline},
    xml::{XmlDocument, XmlElement, XmlNode},
};
pub use crate::utils::error::{CatalogError, Result};
