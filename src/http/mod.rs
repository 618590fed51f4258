//! HTTP surface of the service.
//!
//! server.rs assembles the router and middleware stack; handlers.rs holds
//! the demonstration endpoints.

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
