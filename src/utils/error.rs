use thiserror::Error;

/// 傳輸層錯誤：網路、DNS、無效 URL 等
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("{0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("{message}")]
    Other { message: String },
}

impl TransportError {
    pub fn other(message: impl Into<String>) -> Self {
        TransportError::Other {
            message: message.into(),
        }
    }
}

/// XML 解析錯誤
#[derive(Error, Debug)]
pub enum XmlError {
    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("XML document has no root element")]
    NoRootElement,

    #[error("XML document has more than one root element: <{name}>")]
    MultipleRootElements { name: String },

    #[error("Text content outside of the root element")]
    TextOutsideRoot,

    #[error("Unclosed element: <{name}>")]
    UnclosedElement { name: String },
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Transport error: {0}")]
    TransportError(#[from] TransportError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing <{element}> element inside <{parent}>")]
    MissingElement { parent: String, element: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl CatalogError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CatalogError::ConfigValidationError { .. } | CatalogError::InvalidConfigValueError { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CatalogError::TransportError(_) => "Check network connectivity and the endpoint URLs",
            CatalogError::IoError(_) => "Check that the output path exists and is writable",
            CatalogError::SerializationError(_) => {
                "Each product record needs title, price, imgUrl and category_id"
            }
            CatalogError::MissingElement { .. } => {
                "Every <category> needs an <id> and a <name> child"
            }
            CatalogError::ConfigValidationError { .. }
            | CatalogError::InvalidConfigValueError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
