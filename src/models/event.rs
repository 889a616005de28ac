//! Upstream wire records and the canonical event shape.

use serde::{Deserialize, Deserializer, Serialize};

/// Decode `null` or a missing field as the type's default value.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response envelope returned by the listing endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListResponse {
    #[serde(default, deserialize_with = "nullable")]
    pub result: PageEnvelope,
}

/// One page of listing results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageEnvelope {
    /// Upstream-reported total for the whole query
    #[serde(default, deserialize_with = "nullable")]
    pub total: u64,

    /// Items on this page
    #[serde(default, deserialize_with = "nullable")]
    pub list: Vec<RawEventItem>,
}

/// An event as sent by the upstream listing endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawEventItem {
    #[serde(default, deserialize_with = "nullable")]
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub tag: String,
    #[serde(default, deserialize_with = "nullable")]
    pub prov_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub city_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub area_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub enter_address: String,

    /// Explicit type label, usually empty
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub event_type: String,

    #[serde(default, deserialize_with = "nullable")]
    pub wanna_go_count: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub circle_count: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub doujinshi_count: i64,

    /// Start instant in epoch milliseconds, `0` when absent
    #[serde(default, deserialize_with = "nullable")]
    pub enter_time: i64,
    /// End instant in epoch milliseconds, `0` when absent
    #[serde(default, deserialize_with = "nullable")]
    pub end_time: i64,
    /// Free-form start time used when `enter_time` is absent
    #[serde(default, deserialize_with = "nullable")]
    pub start_time: String,

    #[serde(default, deserialize_with = "nullable")]
    pub app_logo_pic_url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub logo_pic_url: String,

    /// Lifecycle code, see [`Lifecycle`]
    #[serde(default, deserialize_with = "nullable")]
    pub enabled: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub ended: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub is_online: i32,

    /// Event-kind code, see [`EventKind`]
    #[serde(rename = "evmtype", default, deserialize_with = "nullable")]
    pub evm_type: i32,
}

impl RawEventItem {
    pub fn lifecycle(&self) -> Lifecycle {
        Lifecycle::from_code(self.enabled)
    }

    pub fn is_cancelled(&self) -> bool {
        self.lifecycle() == Lifecycle::Cancelled
    }
}

/// Upstream lifecycle code (`enabled` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Ended,
    Preparing,
    Cancelled,
    /// Any other code; the event's state comes from its dates
    Normal(i32),
}

impl Lifecycle {
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Ended,
            2 => Self::Preparing,
            5 => Self::Cancelled,
            other => Self::Normal(other),
        }
    }
}

/// Upstream event-kind code (`evmtype` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    General,
    Only,
    TeaParty,
    Expo,
}

impl EventKind {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::General),
            1 => Some(Self::Only),
            2 => Some(Self::TeaParty),
            3 => Some(Self::Expo),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::General => "综合展",
            Self::Only => "ONLY",
            Self::TeaParty => "茶会",
            Self::Expo => "漫展",
        }
    }
}

/// Presentation state of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndedState {
    #[serde(rename = "未结束")]
    NotEnded,
    #[serde(rename = "已结束")]
    Ended,
    #[serde(rename = "筹备中")]
    Preparing,
    #[serde(rename = "已取消")]
    Cancelled,
}

/// Whether an event takes place online.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnlineState {
    #[serde(rename = "线上")]
    Online,
    #[serde(rename = "线下")]
    Offline,
}

impl OnlineState {
    pub fn from_flag(flag: i32) -> Self {
        if flag == 1 { Self::Online } else { Self::Offline }
    }
}

/// Normalized event record handed to callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalEvent {
    pub id: i64,

    /// Name with cancellation or progress suffix applied
    pub name: String,

    pub tag: String,

    /// Province, city and district joined with single spaces
    pub location: String,

    pub address: String,

    /// Detail page on the upstream site
    pub url: String,

    #[serde(rename = "type")]
    pub event_type: String,

    pub wanna_go_count: i64,
    pub circle_count: i64,
    pub doujinshi_count: i64,

    /// `YYYY-MM-DD HH:MM:SS`, raw start text, or empty
    pub time: String,

    pub app_logo_pic_url: String,
    pub logo_pic_url: String,
    pub ended: EndedState,
    pub is_online: OnlineState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_envelope_with_nulls() {
        let body = r#"{
            "result": {
                "total": 1,
                "list": [{
                    "id": 7,
                    "name": "Spring Meet",
                    "tag": null,
                    "provName": "上海",
                    "type": "",
                    "enterTime": 1714521600000,
                    "endTime": null,
                    "logoPicUrl": "/logo/7.png?x=1",
                    "enabled": 3,
                    "ended": false,
                    "isOnline": 0,
                    "evmtype": 2
                }]
            }
        }"#;
        let response: ListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.result.total, 1);
        let item = &response.result.list[0];
        assert_eq!(item.id, 7);
        assert_eq!(item.tag, "");
        assert_eq!(item.end_time, 0);
        assert_eq!(item.evm_type, 2);
        assert_eq!(item.lifecycle(), Lifecycle::Normal(3));
    }

    #[test]
    fn test_decode_empty_result() {
        let response: ListResponse = serde_json::from_str(r#"{"result": null}"#).unwrap();
        assert_eq!(response.result.total, 0);
        assert!(response.result.list.is_empty());
    }

    #[test]
    fn test_lifecycle_codes() {
        assert_eq!(Lifecycle::from_code(1), Lifecycle::Ended);
        assert_eq!(Lifecycle::from_code(2), Lifecycle::Preparing);
        assert_eq!(Lifecycle::from_code(5), Lifecycle::Cancelled);
        assert_eq!(Lifecycle::from_code(0), Lifecycle::Normal(0));
    }

    #[test]
    fn test_event_kind_table() {
        assert_eq!(EventKind::from_code(0).map(EventKind::label), Some("综合展"));
        assert_eq!(EventKind::from_code(3).map(EventKind::label), Some("漫展"));
        assert_eq!(EventKind::from_code(9), None);
    }

    #[test]
    fn test_labels_serialize_as_text() {
        assert_eq!(serde_json::to_string(&EndedState::Ended).unwrap(), "\"已结束\"");
        assert_eq!(serde_json::to_string(&OnlineState::Offline).unwrap(), "\"线下\"");
        assert_eq!(serde_json::to_string(&EndedState::Preparing).unwrap(), "\"筹备中\"");
        assert_eq!(OnlineState::from_flag(1), OnlineState::Online);
        assert_eq!(OnlineState::from_flag(2), OnlineState::Offline);
    }
}
