// src/services/fetcher.rs

//! Listing page fetcher.
//!
//! Issues one GET per page against the upstream listing endpoint and decodes
//! the `{ result: { total, list } }` envelope.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{ListResponse, PageEnvelope, UpstreamConfig};
use crate::utils::http;

/// A source of listing pages.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch page `page_no` (1-based) of `query`.
    async fn fetch_page(&self, query: &str, page_no: u32, page_size: u32) -> Result<PageEnvelope>;
}

/// Fetches listing pages over HTTP.
pub struct PageFetcher {
    client: Client,
    list_url: Url,
}

impl PageFetcher {
    /// Create a fetcher with a client built from the upstream settings.
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = http::create_async_client(config)?;
        Self::with_client(client, &config.list_url)
    }

    /// Create a fetcher around an existing client.
    pub fn with_client(client: Client, list_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            list_url: Url::parse(list_url)?,
        })
    }

    /// Full request URL for one page.
    pub fn page_url(&self, query: &str, page_no: u32, page_size: u32) -> Url {
        let mut url = self.list_url.clone();
        url.query_pairs_mut()
            .append_pair("time", "8")
            .append_pair("sort", "1")
            .append_pair("keyword", query)
            .append_pair("pageNo", &page_no.to_string())
            .append_pair("pageSize", &page_size.to_string());
        url
    }

    /// Decode a response body into a page envelope.
    pub fn decode(body: &str) -> Result<PageEnvelope> {
        let response: ListResponse = serde_json::from_str(body).map_err(AppError::decode)?;
        Ok(response.result)
    }
}

#[async_trait]
impl PageSource for PageFetcher {
    async fn fetch_page(&self, query: &str, page_no: u32, page_size: u32) -> Result<PageEnvelope> {
        let url = self.page_url(query, page_no, page_size);
        log::debug!("GET {url}");

        let body = self.client.get(url).send().await?.text().await?;
        Self::decode(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> PageFetcher {
        PageFetcher::new(&UpstreamConfig::default()).unwrap()
    }

    #[test]
    fn test_page_url_parameters() {
        let url = fetcher().page_url("东方 Project", 2, 10);
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("time".to_string(), "8".to_string()),
                ("sort".to_string(), "1".to_string()),
                ("keyword".to_string(), "东方 Project".to_string()),
                ("pageNo".to_string(), "2".to_string()),
                ("pageSize".to_string(), "10".to_string()),
            ]
        );
        assert_eq!(url.host_str(), Some("www.allcpp.cn"));
        assert_eq!(url.path(), "/allcpp/event/eventMainListV2.do");
    }

    #[test]
    fn test_page_url_empty_keyword() {
        let url = fetcher().page_url("", 1, 100);
        assert!(url.as_str().contains("keyword=&pageNo=1&pageSize=100"));
    }

    #[test]
    fn test_with_client_rejects_bad_url() {
        let result = PageFetcher::with_client(Client::new(), "not a url");
        assert!(matches!(result, Err(AppError::Url(_))));
    }

    #[test]
    fn test_decode_envelope() {
        let page = PageFetcher::decode(
            r#"{"result":{"total":25,"list":[{"id":1,"name":"A"},{"id":2,"name":"B"}]}}"#,
        )
        .unwrap();
        assert_eq!(page.total, 25);
        assert_eq!(page.list.len(), 2);
        assert_eq!(page.list[1].name, "B");
    }

    #[test]
    fn test_decode_html_body_is_decode_error() {
        let err = PageFetcher::decode("<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, AppError::Decode { .. }));
    }

    #[test]
    fn test_decode_wrong_shape_is_decode_error() {
        let err = PageFetcher::decode(r#"{"result":{"total":"many"}}"#).unwrap_err();
        assert!(matches!(err, AppError::Decode { .. }));
    }
}
