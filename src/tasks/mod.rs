//! Task domain types.
//!
//! The store itself is schema-less; this module is where the `tasks` table
//! gets its shape: the `Task` record, the request payloads that create and
//! patch it, and the free-text search filter.

pub mod types;

pub use types::{search_filter, CreateTask, Task, UpdateTask, TASKS_TABLE};
