//! Pieces shared by the gateway and the backend services.

pub mod types;
pub mod utils;
