//! REST API client module for the rebanho backend.
//!
//! This module provides the `ApiClient` for communicating with the
//! livestock management API: animal registry, farms, disease records,
//! vaccine applications and dashboard aggregates.
//!
//! All resource endpoints are bearer-token authenticated; token renewal
//! on 401 is handled by the session layer, not by callers.

pub mod client;
pub mod error;

pub use client::{ApiClient, ListParams};
pub use error::{ApiError, FieldError};
