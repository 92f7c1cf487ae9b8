//! Backend resource service: one read-only listing endpoint per process.

pub mod errors;
pub mod routes;
pub mod startup;

pub use startup::run;
