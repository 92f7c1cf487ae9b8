//! Service layer owning the record collections of the backend services.
//! - Collections are seeded once at startup and never mutated afterwards.
//! - Seed data comes from the record type's built-in set or a JSON file.

pub mod errors;
pub mod storage;

pub use storage::collection::ResourceCollection;
