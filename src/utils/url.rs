// src/utils/url.rs

//! URL manipulation utilities.

use std::sync::LazyLock;

use regex::Regex;

static QUERY_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\?.*$").expect("valid query regex"));

/// Resolve an image path against the CDN prefix.
///
/// Empty input stays empty, anything already starting with an http scheme is
/// returned untouched, so resolving twice never double-prefixes.
///
/// # Examples
/// ```
/// use allcpp_search::utils::url::resolve_image;
///
/// assert_eq!(
///     resolve_image("https://cdn.example/upload", "/img/a.png"),
///     "https://cdn.example/upload/img/a.png"
/// );
/// ```
pub fn resolve_image(cdn_prefix: &str, path: &str) -> String {
    if path.is_empty() || path.starts_with("http") {
        return path.to_string();
    }
    format!("{cdn_prefix}{path}")
}

/// Drop a trailing `?query` component.
pub fn strip_query(path: &str) -> String {
    QUERY_SUFFIX.replace(path, "").into_owned()
}

/// Pick the app logo, deriving it from the generic logo when absent.
pub fn resolve_app_logo(cdn_prefix: &str, app_logo: &str, logo: &str) -> String {
    if !app_logo.is_empty() {
        return resolve_image(cdn_prefix, app_logo);
    }
    if logo.is_empty() {
        return String::new();
    }
    resolve_image(cdn_prefix, &strip_query(logo))
}

/// Fill the `{id}` placeholder of a detail page template.
pub fn detail_url(template: &str, id: i64) -> String {
    template.replace("{id}", &id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CDN: &str = "https://cdn.example/upload";

    #[test]
    fn test_resolve_relative_path() {
        assert_eq!(
            resolve_image(CDN, "/img/x.png?ver=2"),
            "https://cdn.example/upload/img/x.png?ver=2"
        );
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let once = resolve_image(CDN, "/img/x.png");
        assert_eq!(resolve_image(CDN, &once), once);
        assert_eq!(
            resolve_image(CDN, "http://other.example/a.png"),
            "http://other.example/a.png"
        );
    }

    #[test]
    fn test_resolve_empty() {
        assert_eq!(resolve_image(CDN, ""), "");
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(strip_query("/img/x.png?ver=2&a=b"), "/img/x.png");
        assert_eq!(strip_query("/img/x.png"), "/img/x.png");
    }

    #[test]
    fn test_app_logo_prefers_app_field() {
        assert_eq!(
            resolve_app_logo(CDN, "/app.png?v=1", "/logo.png"),
            "https://cdn.example/upload/app.png?v=1"
        );
    }

    #[test]
    fn test_app_logo_falls_back_to_logo_without_query() {
        assert_eq!(
            resolve_app_logo(CDN, "", "/img/x.png?ver=2"),
            "https://cdn.example/upload/img/x.png"
        );
        assert_eq!(
            resolve_app_logo(CDN, "", "https://abs.example/x.png?ver=2"),
            "https://abs.example/x.png"
        );
        assert_eq!(resolve_app_logo(CDN, "", ""), "");
    }

    #[test]
    fn test_detail_url() {
        assert_eq!(
            detail_url("https://www.allcpp.cn/allcpp/event/event.do?event={id}", 42),
            "https://www.allcpp.cn/allcpp/event/event.do?event=42"
        );
    }
}
