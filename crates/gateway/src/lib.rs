//! Stateless gateway: forwards each request to the one backend owning the
//! requested resource and relays the answer, or a structured error.

pub mod config;
pub mod errors;
pub mod upstream;
pub mod proxy;
pub mod bootstrap;
