//! Home page handler.
//!
//! Renders the `top` template for `GET /`. Render failures propagate to the
//! error chain as `HandlerError::Render`.

use crate::config::AppState;
use crate::error::HandlerError;
use minijinja::context;

const TOP_TEMPLATE: &str = "top";
const PAGE_TITLE: &str = "Home";
const PAGE_MESSAGE: &str = "Welcome to the top page.";

pub fn render_top(state: &AppState) -> Result<String, HandlerError> {
    state.templates.render(
        TOP_TEMPLATE,
        context! {
            title => PAGE_TITLE,
            message => PAGE_MESSAGE,
        },
    )
}
