//! Request routing dispatch.
//!
//! Entry point for HTTP request processing. Every request is tried against
//! the router (exactly one route: `GET /`), then the static asset server,
//! and finally the error middleware chain.

use crate::config::AppState;
use crate::error::HandlerError;
use crate::handler::middleware::StageContext;
use crate::handler::{home, static_files};
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Request information extracted once and threaded through dispatch.
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

impl RequestContext {
    fn stage_context(&self) -> StageContext<'_> {
        StageContext {
            method: self.method.as_str(),
            path: &self.path,
        }
    }
}

/// Outcome of the router and static lookup, before the error chain runs.
pub enum Disposition {
    Responded(Response<Full<Bytes>>),
    NotFound,
    Failed(HandlerError),
}

/// Main entry point, called by the connection driver for every request.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let ctx = RequestContext {
        method: req.method().clone(),
        path: req.uri().path().to_string(),
        is_head: *req.method() == Method::HEAD,
        if_none_match: req
            .headers()
            .get("if-none-match")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string),
    };

    let response = dispatch(&ctx, &state).await;

    if state.config.logging.access_log {
        let body_bytes =
            usize::try_from(response.body().size_hint().exact().unwrap_or(0)).unwrap_or(0);
        logger::log_access(
            ctx.method.as_str(),
            &ctx.path,
            response.status().as_u16(),
            body_bytes,
        );
    }

    Ok(response)
}

/// Route the request and forward misses and failures to the error chain.
pub async fn dispatch(ctx: &RequestContext, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    match route_request(ctx, state).await {
        Disposition::Responded(response) => response,
        Disposition::NotFound => state.error_chain.run(None, &ctx.stage_context()),
        Disposition::Failed(err) => state.error_chain.run(Some(&err), &ctx.stage_context()),
    }
}

async fn route_request(ctx: &RequestContext, state: &Arc<AppState>) -> Disposition {
    let is_get_like = ctx.method == Method::GET || ctx.method == Method::HEAD;

    // 1. The router maps exactly one route: GET / (HEAD implied).
    if ctx.path == "/" && is_get_like {
        return match home::render_top(state) {
            Ok(html) => Disposition::Responded(http::build_html_response(html, ctx.is_head)),
            Err(err) => Disposition::Failed(err),
        };
    }

    // 2. Unmatched requests try the public directory next.
    if is_get_like {
        if let Some((content, content_type)) =
            static_files::load_from_directory(&state.config.resources.public_dir, &ctx.path).await
        {
            return Disposition::Responded(static_files::build_response(
                &content,
                content_type,
                ctx.if_none_match.as_deref(),
                ctx.is_head,
            ));
        }
    }

    // 3. Nothing matched; the error chain answers.
    Disposition::NotFound
}
