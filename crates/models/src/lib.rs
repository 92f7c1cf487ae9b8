//! Record types served by the backend resource services.
//!
//! Every record belongs to exactly one [`ResourceKind`]; the kind's textual
//! form doubles as the HTTP route segment and the configuration key.

pub mod errors;
pub mod resource;
pub mod record;
pub mod user;
pub mod order;

pub use errors::ModelError;
pub use order::Order;
pub use record::Record;
pub use resource::ResourceKind;
pub use user::User;
