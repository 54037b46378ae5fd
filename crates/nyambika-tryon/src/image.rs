//! Image input normalization.
//!
//! Callers may supply any of three encodings for a photo: a remote http(s)
//! URL, a `data:image/...;base64,` URL, or raw base64. Each adapter needs a
//! specific one, so all conversion lives here at the boundary.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::Client;

use crate::error::{ProviderResult, TryOnError};

/// Image subtypes accepted in a data URL prefix.
const DATA_URL_SUBTYPES: [&str; 4] = ["png", "jpeg", "jpg", "webp"];

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value.len() >= prefix.len()
        && value.is_char_boundary(prefix.len())
        && value[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Whether the value is a remote http(s) URL.
pub fn is_http_url(value: &str) -> bool {
    starts_with_ignore_case(value, "http://") || starts_with_ignore_case(value, "https://")
}

/// Whether the value carries a `data:image/` prefix.
pub fn is_data_url(value: &str) -> bool {
    starts_with_ignore_case(value, "data:image/")
}

/// Wrap a raw base64 payload as a renderable jpeg data URL.
pub fn as_jpeg_data_url(base64: &str) -> String {
    format!("data:image/jpeg;base64,{}", base64)
}

/// Strip a `data:image/{png|jpg|jpeg|webp};base64,` prefix, case-insensitively.
///
/// Input without a matching prefix is returned unchanged, so the function is
/// idempotent on raw base64 and on URLs.
pub fn remove_data_url_prefix(data: &str) -> &str {
    const SCHEME: &str = "data:image/";
    const MARKER: &str = ";base64,";

    if !starts_with_ignore_case(data, SCHEME) {
        return data;
    }
    let rest = &data[SCHEME.len()..];
    for subtype in DATA_URL_SUBTYPES {
        if !starts_with_ignore_case(rest, subtype) {
            continue;
        }
        let after = &rest[subtype.len()..];
        if starts_with_ignore_case(after, MARKER) && after.len() > MARKER.len() {
            return &after[MARKER.len()..];
        }
    }
    data
}

/// Fetch a remote image and return its raw base64 payload (no prefix).
pub async fn fetch_as_base64(client: &Client, url: &str) -> ProviderResult<String> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(TryOnError::Fetch(format!("Failed to fetch image: {}", url)));
    }
    let bytes = response.bytes().await?;
    Ok(STANDARD.encode(&bytes))
}

/// Normalize an input for the ClothFlow service: the result is always a
/// `data:image/...;base64,` URL.
///
/// URLs are fetched and re-wrapped so the service never has to reach back
/// over the network; data URLs pass through unchanged; raw base64 gains a
/// jpeg prefix.
pub async fn to_clothflow_input(client: &Client, value: &str) -> ProviderResult<String> {
    if is_http_url(value) {
        let base64 = fetch_as_base64(client, value).await?;
        return Ok(as_jpeg_data_url(&base64));
    }
    if is_data_url(value) {
        return Ok(value.to_string());
    }
    Ok(as_jpeg_data_url(value))
}

/// Normalize an input to raw base64 (no prefix), fetching URLs as needed.
pub async fn to_raw_base64(client: &Client, value: &str) -> ProviderResult<String> {
    if is_http_url(value) {
        return fetch_as_base64(client, value).await;
    }
    Ok(remove_data_url_prefix(value).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_prefix_all_subtypes() {
        assert_eq!(remove_data_url_prefix("data:image/png;base64,AAAA"), "AAAA");
        assert_eq!(remove_data_url_prefix("data:image/jpeg;base64,BBBB"), "BBBB");
        assert_eq!(remove_data_url_prefix("data:image/jpg;base64,CCCC"), "CCCC");
        assert_eq!(remove_data_url_prefix("data:image/webp;base64,DDDD"), "DDDD");
    }

    #[test]
    fn test_remove_prefix_case_insensitive() {
        assert_eq!(remove_data_url_prefix("DATA:IMAGE/PNG;BASE64,AAAA"), "AAAA");
    }

    #[test]
    fn test_remove_prefix_is_identity_on_non_matching_input() {
        assert_eq!(remove_data_url_prefix("AAAA"), "AAAA");
        assert_eq!(remove_data_url_prefix("https://example.com/a.jpg"), "https://example.com/a.jpg");
        // unsupported subtype
        assert_eq!(remove_data_url_prefix("data:image/gif;base64,EEEE"), "data:image/gif;base64,EEEE");
        // empty payload does not match
        assert_eq!(remove_data_url_prefix("data:image/png;base64,"), "data:image/png;base64,");
    }

    #[test]
    fn test_url_predicates() {
        assert!(is_http_url("https://example.com/a.jpg"));
        assert!(is_http_url("HTTP://example.com/a.jpg"));
        assert!(!is_http_url("data:image/png;base64,AAAA"));
        assert!(is_data_url("data:image/png;base64,AAAA"));
        assert!(!is_data_url("AAAA"));
    }

    #[test]
    fn test_jpeg_data_url() {
        assert_eq!(as_jpeg_data_url("abcd"), "data:image/jpeg;base64,abcd");
    }
}
