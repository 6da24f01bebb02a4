//! Authentication module for managing the user session.
//!
//! This module provides:
//! - `SessionManager`: in-memory access token + user profile, with login,
//!   logout and silent renewal via the server-held refresh cookie
//! - `device::descriptor`: the client classification string sent with
//!   login and refresh calls
//!
//! Nothing here is persisted client-side. Recovering a session after a
//! restart depends entirely on the HTTP-only refresh cookie the server
//! manages.

pub mod device;
pub mod session;

pub use session::{Session, SessionManager, SessionState};
