//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, catch-all dispatch)
//!     → routing layer picks the action + path params
//!     → handlers.rs (validate, call store, build response)
//!     → Send to client
//! ```

pub mod handlers;
pub mod server;

pub use server::HttpServer;
