use serde::{Deserialize, Serialize};
use std::fmt;

/// 傳輸層回應：狀態碼與原始文字內容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx 視為成功
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 目錄欄位值：數字或字串，輸出時保持原樣
///
/// 數字以 f64 保存並依 ECMAScript Number::toString 規則輸出，
/// 超過 2^53 的整數與瀏覽器一樣會失去精度。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => f.write_str(&format_js_number(*n)),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// 1e21 以上或 1e-6 以下改用指數表示，正指數帶 '+'
pub fn format_js_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{}", n);
    }

    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<FieldValue>,
    pub title: String,
    pub price: FieldValue,
    #[serde(rename = "imgUrl")]
    pub img_url: String,
    #[serde(rename = "productURL", alias = "productUrl", default)]
    pub product_url: String,
    pub category_id: FieldValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// 兩個來源各自的抓取結果；商品保留原始記錄，渲染前才逐筆解碼
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    pub products: crate::core::fetch::FetchResult<Vec<serde_json::Value>>,
    pub categories: crate::core::fetch::FetchResult<crate::core::xml::XmlDocument>,
}

/// 轉換後的 HTML 片段；抓取或解析失敗的區塊為 None
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedPage {
    pub products_html: Option<String>,
    pub categories_html: Option<String>,
    pub product_count: usize,
    pub category_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageReport {
    pub output_path: String,
    pub product_count: usize,
    pub category_count: usize,
    pub written_files: Vec<String>,
}
