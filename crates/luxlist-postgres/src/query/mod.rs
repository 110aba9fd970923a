//! Database query repositories for all entities in the system.
//!
//! Every repository is an extension trait implemented for
//! [`PgConnection`](crate::PgConnection), so a pooled connection obtained
//! from [`PgClient::get_connection`](crate::PgClient::get_connection) can call
//! them directly. Lookups that may miss return `Option`; deletes report
//! whether a row was removed.
//!
//! # Ownership
//!
//! Task and tag queries always take the owning user id, so a row owned by
//! somebody else is indistinguishable from a missing one.

mod tag;
mod task;
mod task_tag;
mod user;

pub use tag::TagRepository;
pub use task::TaskRepository;
pub use task_tag::TaskTagRepository;
pub use user::UserRepository;
