//! Storage subsystem.
//!
//! # Data Flow
//! ```text
//! Handler call (select / insert / update / delete)
//!     → engine.rs (in-memory table mutation)
//!     → persist: serialize ALL tables → temp file → rename over data file
//!
//! Startup:
//!     data file (JSON object: table name → record array)
//!     → loaded fully into memory (missing file = empty tables)
//! ```
//!
//! # Design Decisions
//! - The engine exclusively owns the table collection and the backing file
//! - Full-file rewrite per mutation: a documented small-scale limitation
//! - Temp-file + rename so a failed write never truncates existing data
//! - Linear scans only; no indexes

pub mod engine;

pub use engine::{Filter, Record, Store, StoreError};
