//! Response types for HTTP handlers.

mod authentications;
mod error_response;
mod monitors;
mod tags;
mod tasks;
mod users;

pub use authentications::*;
pub use error_response::ErrorResponse;
pub use monitors::*;
pub use tags::*;
pub use tasks::*;
pub use users::*;
