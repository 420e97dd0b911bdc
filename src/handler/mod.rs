//! Request handling: routing dispatch, the home handler, static asset
//! serving, and the error middleware chain.

pub mod home;
pub mod middleware;
pub mod router;
pub mod static_files;

pub use router::handle_request;
