//! Static asset serving.
//!
//! Resolves unmatched request paths to files under the public directory and
//! serves them verbatim. A miss is a fallthrough condition for the error
//! chain, never an error.

use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

const DEFAULT_INDEX: &str = "index.html";

/// Resolve `path` under `public_dir` and load the file.
///
/// Returns `None` when no file matches or when the path would escape the
/// public directory.
pub async fn load_from_directory(public_dir: &str, path: &str) -> Option<(Vec<u8>, &'static str)> {
    // Remove the leading slash and any parent-directory components up front.
    let clean_path = path.trim_start_matches('/').replace("..", "");
    let mut file_path = Path::new(public_dir).join(&clean_path);

    let public_dir_canonical = match Path::new(public_dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Public directory not found or inaccessible '{public_dir}': {e}"
            ));
            return None;
        }
    };

    // Directory requests fall back to the index file.
    if file_path.is_dir() || clean_path.ends_with('/') {
        file_path = file_path.join(DEFAULT_INDEX);
    }

    // A missing file is a plain 404 fallthrough, not worth a log line.
    let Ok(file_path_canonical) = file_path.canonicalize() else {
        return None;
    };
    if !file_path_canonical.starts_with(&public_dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            file_path_canonical.display()
        ));
        return None;
    }

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path.display(),
                e
            ));
            return None;
        }
    };

    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));

    Some((content, content_type))
}

/// Build the response for a resolved asset, honoring `If-None-Match`.
pub fn build_response(
    data: &[u8],
    content_type: &'static str,
    if_none_match: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(data);

    if cache::check_etag_match(if_none_match, &etag) {
        return http::build_304_response(&etag);
    }

    http::build_cached_response(Bytes::from(data.to_owned()), content_type, &etag, is_head)
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests run against the repo's own public/ directory.

    #[tokio::test]
    async fn test_serves_existing_file_with_content_type() {
        let (content, content_type) = load_from_directory("public", "/css/style.css")
            .await
            .unwrap();
        assert!(!content.is_empty());
        assert_eq!(content_type, "text/css");
    }

    #[tokio::test]
    async fn test_file_is_served_verbatim() {
        let (content, content_type) = load_from_directory("public", "/robots.txt")
            .await
            .unwrap();
        let on_disk = std::fs::read("public/robots.txt").unwrap();
        assert_eq!(content, on_disk);
        assert_eq!(content_type, "text/plain; charset=utf-8");
    }

    #[tokio::test]
    async fn test_missing_file_is_a_miss() {
        assert!(load_from_directory("public", "/nonexistent-path").await.is_none());
    }

    #[tokio::test]
    async fn test_traversal_is_blocked() {
        assert!(load_from_directory("public", "/../Cargo.toml").await.is_none());
        assert!(load_from_directory("public", "/%2e%2e/Cargo.toml").await.is_none());
    }

    #[tokio::test]
    async fn test_missing_public_dir_is_a_miss() {
        assert!(load_from_directory("no-such-dir", "/style.css").await.is_none());
    }

    #[test]
    fn test_matching_etag_yields_304() {
        let data = b"body { margin: 0; }";
        let etag = cache::generate_etag(data);
        let resp = build_response(data, "text/css", Some(&etag), false);
        assert_eq!(resp.status(), 304);
    }

    #[test]
    fn test_fresh_request_yields_200() {
        let data = b"body { margin: 0; }";
        let resp = build_response(data, "text/css", None, false);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("Content-Type").unwrap(), "text/css");
        assert!(resp.headers().contains_key("ETag"));
    }
}
