//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (ordered route table scan)
//!     → matcher.rs (template match + parameter capture)
//!     → Return: (Action, PathParams) or NoMatch
//!
//! Route Compilation (at startup):
//!     "/tasks/:id"
//!     → Split into segments
//!     → Literal / Param segment list
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex, wildcards, or optional segments
//! - Deterministic: first match wins, in declaration order
//! - Explicit NoMatch (None) rather than silent default

pub mod matcher;
pub mod router;

pub use matcher::{PathParams, RouteTemplate};
pub use router::{Action, Router};
