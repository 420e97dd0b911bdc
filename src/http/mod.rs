//! HTTP utility modules: response builders, MIME detection, cache control.

pub mod cache;
pub mod mime;
pub mod response;

pub use response::{
    build_304_response, build_404_response, build_500_response, build_cached_response,
    build_html_response,
};
