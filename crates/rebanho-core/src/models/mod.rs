//! Data models for rebanho entities.
//!
//! This module contains the data structures exchanged with the
//! livestock management API:
//!
//! - `Animal`, `AnimalInput`: herd registry records
//! - `Farm`, `FarmInput`: properties animals belong to
//! - `DiseaseRecord`, `VaccineApplication`: health history
//! - `DashboardSummary`: aggregate counters
//! - `User`, `Paginated`, `Pagination`: profile and response envelopes

pub mod animal;
pub mod dashboard;
pub mod farm;
pub mod health;
pub mod user;

pub use animal::{Animal, AnimalInput, AnimalSex, AnimalStatus};
pub use dashboard::{DashboardSummary, SpeciesCount};
pub use farm::{Farm, FarmInput};
pub use health::{DiseaseInput, DiseaseRecord, VaccineApplication, VaccineInput};
pub use user::{Paginated, Pagination, User};
