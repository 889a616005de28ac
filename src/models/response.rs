//! JSON envelopes printed by the CLI.

use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;
use crate::models::{CanonicalEvent, PageEnvelope, RawEventItem};

/// Uniform `{code, msg, total?, data}` response.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: u16,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    pub data: T,
}

impl ApiResponse<Vec<CanonicalEvent>> {
    /// Keyword search result, echoing the keyword as the message.
    pub fn search(keyword: &str, events: Vec<CanonicalEvent>) -> Self {
        Self {
            code: 200,
            msg: keyword.to_string(),
            total: None,
            data: events,
        }
    }

    /// Full catalog listing.
    pub fn catalog(events: Vec<CanonicalEvent>, total: u64) -> Self {
        Self {
            code: 200,
            msg: "所有漫展".to_string(),
            total: Some(total),
            data: events,
        }
    }
}

impl ApiResponse<Vec<Value>> {
    pub fn missing_keyword() -> Self {
        Self::failure(400, "请提供搜索关键词".to_string())
    }

    pub fn fetch_failed(error: &AppError) -> Self {
        Self::failure(500, format!("获取数据失败: {error}"))
    }

    fn failure(code: u16, msg: String) -> Self {
        Self {
            code,
            msg,
            total: None,
            data: Vec::new(),
        }
    }
}

/// Undecorated first page, for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct RawResponse {
    pub code: u16,
    pub msg: String,
    pub total: u64,
    pub raw_data: Vec<RawEventItem>,
}

impl From<PageEnvelope> for RawResponse {
    fn from(page: PageEnvelope) -> Self {
        Self {
            code: 200,
            msg: "原始数据（debug模式）".to_string(),
            total: page.total,
            raw_data: page.list,
        }
    }
}
