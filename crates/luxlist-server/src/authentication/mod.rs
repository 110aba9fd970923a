//! Signed identity tokens.
//!
//! A token is the third source of truth of a session next to the cookie
//! session and the session cache entry; see
//! [`require_authentication`](crate::middleware::require_authentication) for how
//! the three are cross-checked.

mod token;

pub use token::{Claims, MIN_SECRET_LEN, TokenCodec, TokenError};
