use crate::core::xml::{XmlDocument, XmlElement};
use crate::domain::model::{Category, Product};
use crate::utils::error::{CatalogError, Result};
use serde::Deserialize;

pub const DEFAULT_MAX_PRODUCTS: usize = 6;
pub const DEFAULT_TITLE_MAX_CHARS: usize = 20;
pub const CATEGORY_PLACEHOLDER: &str =
    "<option selected disabled>Seleccione una categoría</option>";

const PRODUCT_CARD_TEMPLATE: &str = r#"
<div class="space-y-4 bg-white dark:bg-gray-800 p-4 rounded-2xl shadow">
    <img
        class="w-full h-40 bg-gray-300 dark:bg-gray-700 rounded-lg object-cover transition-transform duration-300 hover:scale-[1.03]"
        src="[PRODUCT.IMGURL]" alt="[PRODUCT.TITLE]">
    <h3
        class="h-6 text-xl font-semibold tracking-tight text-gray-900 dark:text-white hover:text-black-600 dark:hover:text-white-400">
        $[PRODUCT.PRICE]
    </h3>

    <div class="h-5 rounded w-full">[PRODUCT.TITLE]</div>
    <div class="space-y-2">
        <a href="[PRODUCT.PRODUCTURL]" target="_blank" rel="noopener noreferrer"
        class="text-white bg-blue-700 hover:bg-blue-800 focus:ring-4 focus:outline-none focus:ring-blue-300 font-medium rounded-lg text-sm px-5 py-2.5 text-center dark:bg-blue-600 dark:hover:bg-blue-700 dark:focus:ring-blue-800 w-full inline-block">
            Ver en Amazon
        </a>
        <div class="hidden"><span class="1">[PRODUCT.CATEGORY_ID]</span></div>
    </div>
</div>"#;

const CATEGORY_OPTION_TEMPLATE: &str = r#"<option value="[ID]">[NAME]</option>"#;

/// 超過上限的標題截斷並補上 "..."（以字元計）
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() > max_chars {
        let mut short: String = title.chars().take(max_chars).collect();
        short.push_str("...");
        short
    } else {
        title.to_string()
    }
}

pub fn render_product_card(product: &Product, title_max_chars: usize) -> String {
    PRODUCT_CARD_TEMPLATE
        .replace("[PRODUCT.TITLE]", &truncate_title(&product.title, title_max_chars))
        .replace("[PRODUCT.PRICE]", &product.price.to_string())
        .replace("[PRODUCT.IMGURL]", &product.img_url)
        .replace("[PRODUCT.PRODUCTURL]", &product.product_url)
        .replace("[PRODUCT.CATEGORY_ID]", &product.category_id.to_string())
}

/// 逐筆解碼的結果：第一筆失敗前的項目，以及造成中斷的錯誤
#[derive(Debug)]
pub struct Decoded<T> {
    pub items: Vec<T>,
    pub error: Option<CatalogError>,
}

impl<T> Decoded<T> {
    fn collect<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Result<T>>,
    {
        let mut items = Vec::new();
        for item in iter {
            match item {
                Ok(item) => items.push(item),
                Err(e) => {
                    return Self {
                        items,
                        error: Some(e),
                    }
                }
            }
        }
        Self { items, error: None }
    }
}

/// 只解碼前 `max_products` 筆記錄，之後的記錄不檢查
pub fn decode_products(records: &[serde_json::Value], max_products: usize) -> Decoded<Product> {
    Decoded::collect(
        records
            .iter()
            .take(max_products)
            .map(|record| Product::deserialize(record).map_err(CatalogError::from)),
    )
}

pub fn render_products(products: &[Product], title_max_chars: usize) -> String {
    products
        .iter()
        .map(|product| render_product_card(product, title_max_chars))
        .collect()
}

fn child_text(element: &XmlElement, child: &str) -> Result<String> {
    element
        .first_element_by_tag_name(child)
        .map(XmlElement::text_content)
        .ok_or_else(|| CatalogError::MissingElement {
            parent: element.name().to_string(),
            element: child.to_string(),
        })
}

/// 從 `<category>` 元素取出 id 與 name，遇到缺欄位的元素即停止
pub fn categories_from_document(document: &XmlDocument) -> Decoded<Category> {
    Decoded::collect(
        document
            .get_elements_by_tag_name("category")
            .into_iter()
            .map(|element| {
                Ok(Category {
                    id: child_text(element, "id")?,
                    name: child_text(element, "name")?,
                })
            }),
    )
}

pub fn render_category_options(categories: &[Category]) -> String {
    let mut html = String::from(CATEGORY_PLACEHOLDER);
    for category in categories {
        html.push_str(
            &CATEGORY_OPTION_TEMPLATE
                .replacen("[ID]", &category.id, 1)
                .replacen("[NAME]", &category.name, 1),
        );
    }
    html
}
