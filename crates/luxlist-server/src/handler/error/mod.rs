//! [`Error`], [`ErrorKind`] and [`Result`].

mod http_error;
mod pg_constraints;
mod pg_error;
mod session_error;

pub use http_error::{Error, ErrorKind, Result};
