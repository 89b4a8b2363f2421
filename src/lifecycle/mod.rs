//! Lifecycle management.
//!
//! Startup is linear enough to live in `main`; this module owns the one
//! shared piece, the shutdown coordinator.

pub mod shutdown;

pub use shutdown::Shutdown;
