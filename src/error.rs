//! Application error taxonomy
//!
//! Everything a handler can fail with. Errors are never handled at the point
//! of origin; they are forwarded into the error middleware chain, which
//! decides the user-visible response.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("template rendering failed: {0}")]
    Render(#[from] minijinja::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
