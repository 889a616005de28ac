// src/services/normalizer.rs

//! Maps raw upstream items to canonical events.
//!
//! Normalization depends only on the item, the configured timezone, and the
//! instant reported by the injected [`Clock`].

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

use crate::models::{
    CanonicalEvent, EndedState, EventKind, Lifecycle, OnlineState, RawEventItem, UpstreamConfig,
};
use crate::utils::time::{self, Clock, TIME_FORMAT};
use crate::utils::url;

const CANCELLED_SUFFIX: &str = "(已取消)";
const IN_PROGRESS_SUFFIX: &str = "(进行中)";

/// Turns [`RawEventItem`]s into [`CanonicalEvent`]s.
#[derive(Clone)]
pub struct EventNormalizer {
    tz: Tz,
    clock: Arc<dyn Clock>,
    cdn_prefix: String,
    detail_url_template: String,
}

impl EventNormalizer {
    pub fn new(config: &UpstreamConfig, tz: Tz, clock: Arc<dyn Clock>) -> Self {
        Self {
            tz,
            clock,
            cdn_prefix: config.cdn_prefix.clone(),
            detail_url_template: config.detail_url_template.clone(),
        }
    }

    /// Normalize every item of a page, preserving order.
    pub fn normalize_all(&self, items: &[RawEventItem]) -> Vec<CanonicalEvent> {
        let now = self.now();
        items.iter().map(|item| self.normalize_at(item, now)).collect()
    }

    /// Normalize a single item against the clock's current instant.
    pub fn normalize(&self, item: &RawEventItem) -> CanonicalEvent {
        self.normalize_at(item, self.now())
    }

    fn now(&self) -> DateTime<Tz> {
        self.clock.now().with_timezone(&self.tz)
    }

    fn normalize_at(&self, item: &RawEventItem, now: DateTime<Tz>) -> CanonicalEvent {
        CanonicalEvent {
            id: item.id,
            name: self.display_name(item, now),
            tag: item.tag.clone(),
            location: location(item),
            address: item.enter_address.clone(),
            url: url::detail_url(&self.detail_url_template, item.id),
            event_type: event_type(item).to_string(),
            wanna_go_count: item.wanna_go_count,
            circle_count: item.circle_count,
            doujinshi_count: item.doujinshi_count,
            time: self.display_time(item),
            app_logo_pic_url: url::resolve_app_logo(
                &self.cdn_prefix,
                &item.app_logo_pic_url,
                &item.logo_pic_url,
            ),
            logo_pic_url: url::resolve_image(&self.cdn_prefix, &item.logo_pic_url),
            ended: self.ended_state(item, now),
            is_online: OnlineState::from_flag(item.is_online),
        }
    }

    fn display_name(&self, item: &RawEventItem, now: DateTime<Tz>) -> String {
        let mut name = item.name.clone();
        let suffix = if item.is_cancelled() {
            Some(CANCELLED_SUFFIX.to_string())
        } else {
            self.status_suffix(item, now)
        };

        if let Some(suffix) = suffix {
            if !name.contains(&suffix) {
                name.push_str(&suffix);
            }
        }
        name
    }

    /// `(进行中)` while running, `(还有N天开始)` before the start date.
    fn status_suffix(&self, item: &RawEventItem, now: DateTime<Tz>) -> Option<String> {
        let enter = time::from_millis(self.tz, item.enter_time)?;
        let end = time::from_millis(self.tz, item.end_time).unwrap_or(enter);

        let today = now.date_naive();
        let enter_date = enter.date_naive();
        let end_date = end.date_naive();

        if now.naive_local() > end_of_day(end_date) {
            return None;
        }
        if today >= enter_date && today <= end_date {
            return Some(IN_PROGRESS_SUFFIX.to_string());
        }
        if now < enter {
            let days_left = (enter_date - today).num_days();
            if days_left > 0 {
                return Some(format!("(还有{days_left}天开始)"));
            }
        }
        None
    }

    fn display_time(&self, item: &RawEventItem) -> String {
        match time::from_millis(self.tz, item.enter_time) {
            Some(enter) => enter.format(TIME_FORMAT).to_string(),
            None => item.start_time.clone(),
        }
    }

    fn ended_state(&self, item: &RawEventItem, now: DateTime<Tz>) -> EndedState {
        match item.lifecycle() {
            Lifecycle::Ended => return EndedState::Ended,
            Lifecycle::Preparing => return EndedState::Preparing,
            Lifecycle::Cancelled => return EndedState::Cancelled,
            Lifecycle::Normal(_) => {}
        }

        if let Some(end) = time::from_millis(self.tz, item.end_time) {
            if now.naive_local() > end_of_day(end.date_naive()) {
                return EndedState::Ended;
            }
        }

        if item.ended {
            EndedState::Ended
        } else {
            EndedState::NotEnded
        }
    }
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(23, 59, 59).unwrap_or_default()
}

fn location(item: &RawEventItem) -> String {
    [&item.prov_name, &item.city_name, &item.area_name]
        .into_iter()
        .filter(|part| !part.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

fn event_type(item: &RawEventItem) -> &str {
    if !item.event_type.is_empty() {
        return &item.event_type;
    }
    if let Some(kind) = EventKind::from_code(item.evm_type) {
        return kind.label();
    }

    let tag = item.tag.to_uppercase();
    if tag.contains("ONLY") {
        EventKind::Only.label()
    } else if tag.contains("茶会") || tag.contains("茶话会") {
        EventKind::TeaParty.label()
    } else {
        EventKind::General.label()
    }
}
