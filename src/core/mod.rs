pub mod engine;
pub mod fetch;
pub mod pipeline;
pub mod render;
pub mod xml;

pub use crate::domain::model::{CatalogSnapshot, Category, HttpResponse, Product, RenderedPage};
pub use crate::domain::ports::{ConfigProvider, HttpTransport, Pipeline, Storage};
pub use crate::utils::error::Result;
