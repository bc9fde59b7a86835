//! HTTP API Layer
//!
//! Thin axum adapter over [`todo_core::TodoRepository`]: request parsing,
//! status mapping, access logging and the serve loop.

pub mod error;
pub mod handler;
pub mod middleware;
pub mod server;
pub mod types;

pub use server::{router, ApiState, HttpServer, HttpServerConfig};
