//! Storage abstractions for the service layer.
//!
//! Only read-only, in-memory collections exist; nothing is written back.

pub mod collection;
