//! 抓取並正規化：把傳輸、HTTP 狀態、解析三種失敗統一成 [`FetchResult`]。
//!
//! 兩個 fetcher 都不會回傳 `Err` 也不會 panic，呼叫端只需要判斷成功與否。

use crate::core::xml::XmlDocument;
use crate::domain::ports::HttpTransport;
use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// JSON fetcher 的 HTTP 失敗前綴
pub const JSON_HTTP_ERROR_PREFIX: &str = "Error HTTP:";
/// XML fetcher 的 HTTP 失敗前綴（大小寫與 JSON 不同，維持既有消費端的字串相容）
pub const XML_HTTP_ERROR_PREFIX: &str = "ERROR HTTP:";

#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult<T> {
    Success(T),
    Failure(String),
}

impl<T> FetchResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success(_))
    }

    pub fn body(&self) -> Option<&T> {
        match self {
            FetchResult::Success(body) => Some(body),
            FetchResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchResult::Success(_) => None,
            FetchResult::Failure(message) => Some(message),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> FetchResult<U> {
        match self {
            FetchResult::Success(body) => FetchResult::Success(f(body)),
            FetchResult::Failure(message) => FetchResult::Failure(message),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            FetchResult::Success(body) => Ok(body),
            FetchResult::Failure(message) => Err(message),
        }
    }
}

impl<T> From<Result<T, String>> for FetchResult<T> {
    fn from(result: Result<T, String>) -> Self {
        match result {
            Ok(body) => FetchResult::Success(body),
            Err(message) => FetchResult::Failure(message),
        }
    }
}

/// 序列化為 `{"success": bool, "body": ...}`
impl<T: Serialize> Serialize for FetchResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FetchResult", 2)?;
        match self {
            FetchResult::Success(body) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("body", body)?;
            }
            FetchResult::Failure(message) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("body", message)?;
            }
        }
        state.end()
    }
}

/// GET 並檢查狀態，回傳原始文字內容
async fn fetch_text<H>(transport: &H, url: &str, http_error_prefix: &str) -> Result<String, String>
where
    H: HttpTransport + ?Sized,
{
    let response = transport.get(url).await.map_err(|e| {
        tracing::debug!("Transport failure for {}: {}", url, e);
        e.to_string()
    })?;

    tracing::debug!("Response status for {}: {}", url, response.status);

    if !response.is_ok() {
        return Err(format!("{} {}", http_error_prefix, response.status));
    }

    Ok(response.body)
}

/// 抓取 JSON 資源；payload 型別由呼叫端決定，`serde_json::Value` 則原樣傳回
pub async fn fetch_json<T, H>(transport: &H, url: &str) -> FetchResult<T>
where
    T: DeserializeOwned,
    H: HttpTransport + ?Sized,
{
    let result = fetch_text(transport, url, JSON_HTTP_ERROR_PREFIX)
        .await
        .and_then(|text| serde_json::from_str::<T>(&text).map_err(|e| e.to_string()));

    if let Err(message) = &result {
        tracing::warn!("JSON fetch from {} failed: {}", url, message);
    }
    result.into()
}

/// 抓取 XML 資源並解析為可依標籤查詢的文件
pub async fn fetch_xml<H>(transport: &H, url: &str) -> FetchResult<XmlDocument>
where
    H: HttpTransport + ?Sized,
{
    let result = fetch_text(transport, url, XML_HTTP_ERROR_PREFIX)
        .await
        .and_then(|text| XmlDocument::parse(&text).map_err(|e| e.to_string()));

    if let Err(message) = &result {
        tracing::warn!("XML fetch from {} failed: {}", url, message);
    }
    result.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::HttpResponse;
    use crate::utils::error::TransportError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 固定回應的 transport，並計算呼叫次數
    struct CannedTransport {
        response: std::result::Result<HttpResponse, String>,
        calls: AtomicUsize,
    }

    impl CannedTransport {
        fn ok(status: u16, body: &str) -> Self {
            Self {
                response: Ok(HttpResponse::new(status, body)),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                response: Err(message.to_string()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl HttpTransport for CannedTransport {
        async fn get(&self, _url: &str) -> std::result::Result<HttpResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone().map_err(TransportError::other)
        }
    }

    #[tokio::test]
    async fn test_json_success_passes_value_through() {
        let cases = [
            serde_json::json!([1, 2, 3]),
            serde_json::json!({"a": 1, "b": "two"}),
            serde_json::json!([]),
            serde_json::json!({"outer": {"inner": [{"deep": true}]}}),
        ];

        for value in cases {
            let transport = CannedTransport::ok(200, &value.to_string());
            let result: FetchResult<serde_json::Value> = fetch_json(&transport, "/data.json").await;
            assert_eq!(result, FetchResult::Success(value));
        }
    }

    #[tokio::test]
    async fn test_json_http_error_literal() {
        for status in [404u16, 500, 301] {
            let transport = CannedTransport::ok(status, "{}");
            let result: FetchResult<serde_json::Value> = fetch_json(&transport, "/x").await;
            assert_eq!(result, FetchResult::Failure(format!("Error HTTP: {}", status)));
        }
    }

    #[tokio::test]
    async fn test_xml_http_error_literal() {
        let transport = CannedTransport::ok(404, "<a/>");
        let result = fetch_xml(&transport, "/x.xml").await;
        assert_eq!(result, FetchResult::Failure("ERROR HTTP: 404".to_string()));
    }

    #[tokio::test]
    async fn test_truncated_json_is_a_failure() {
        let transport = CannedTransport::ok(200, r#"{"a":"#);
        let result: FetchResult<serde_json::Value> = fetch_json(&transport, "/x").await;
        assert!(!result.is_success());
        assert!(!result.error().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_typed_payload_mismatch_is_a_failure() {
        let transport = CannedTransport::ok(200, r#"{"not": "a list"}"#);
        let result: FetchResult<Vec<u32>> = fetch_json(&transport, "/x").await;
        assert!(!result.is_success());
    }

    #[tokio::test]
    async fn test_transport_failure_for_both_fetchers() {
        let transport = CannedTransport::failing("connection refused");

        let json: FetchResult<serde_json::Value> = fetch_json(&transport, "/x").await;
        assert_eq!(json, FetchResult::Failure("connection refused".to_string()));

        let xml = fetch_xml(&transport, "/x.xml").await;
        assert_eq!(xml, FetchResult::Failure("connection refused".to_string()));
    }

    #[tokio::test]
    async fn test_xml_categories_are_navigable() {
        let transport = CannedTransport::ok(
            200,
            "<categories><category><id>1</id><name>Books</name></category></categories>",
        );
        let doc = fetch_xml(&transport, "/categories.xml").await.into_result().unwrap();

        let categories = doc.get_elements_by_tag_name("category");
        assert_eq!(categories.len(), 1);
        let id = categories[0].get_elements_by_tag_name("id");
        let name = categories[0].get_elements_by_tag_name("name");
        assert_eq!(id[0].text_content(), "1");
        assert_eq!(name[0].text_content(), "Books");
    }

    #[tokio::test]
    async fn test_malformed_xml_is_a_failure() {
        let transport = CannedTransport::ok(200, "<categories><category></categories>");
        let result = fetch_xml(&transport, "/x.xml").await;
        assert!(!result.is_success());
        assert!(!result.error().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_calls_issue_independent_requests() {
        let transport = CannedTransport::ok(200, r#"[{"id": 1}]"#);
        let first: FetchResult<serde_json::Value> = fetch_json(&transport, "/x").await;
        let second: FetchResult<serde_json::Value> = fetch_json(&transport, "/x").await;

        assert_eq!(first, second);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_repeated_xml_calls_issue_independent_requests() {
        let transport = CannedTransport::ok(
            200,
            "<categories><category><id>1</id><name>Books</name></category></categories>",
        );
        let first = fetch_xml(&transport, "/categories.xml").await;
        let second = fetch_xml(&transport, "/categories.xml").await;

        assert!(first.is_success());
        assert_eq!(first, second);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);

        let failing = CannedTransport::ok(500, "");
        let first = fetch_xml(&failing, "/categories.xml").await;
        let second = fetch_xml(&failing, "/categories.xml").await;
        assert_eq!(first, FetchResult::Failure("ERROR HTTP: 500".to_string()));
        assert_eq!(first, second);
        assert_eq!(failing.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_serialized_shape() {
        let ok: FetchResult<Vec<u8>> = FetchResult::Success(vec![1, 2]);
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            serde_json::json!({"success": true, "body": [1, 2]})
        );

        let failed: FetchResult<Vec<u8>> = FetchResult::Failure("Error HTTP: 500".to_string());
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            serde_json::json!({"success": false, "body": "Error HTTP: 500"})
        );
    }
}
