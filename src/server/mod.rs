//! Server process: listener setup and the connection accept loop.

pub mod connection;
pub mod listener;

pub use connection::accept_loop;
pub use listener::create_listener;
