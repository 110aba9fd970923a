//! Request types for HTTP handlers.

mod authentications;
mod paths;
mod tags;
mod tasks;
mod validations;

pub use authentications::*;
pub use paths::*;
pub use tags::*;
pub use tasks::*;
