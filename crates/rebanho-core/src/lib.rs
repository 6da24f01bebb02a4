//! Core library for rebanho - a client for the rebanho livestock
//! management REST API.
//!
//! This crate provides:
//! - `SessionManager`: token-based session handling with silent renewal
//! - `ApiClient`: typed access to the herd, farm, health and dashboard
//!   endpoints
//! - Data models for animals, farms, vaccinations and diseases
//!
//! The API uses short-lived bearer tokens obtained through `/auth/login`
//! and renewed via `/auth/refresh`, which relies on an HTTP-only refresh
//! cookie held by the transport layer.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiClient, ApiError};
pub use auth::{SessionManager, SessionState};
pub use config::Config;
