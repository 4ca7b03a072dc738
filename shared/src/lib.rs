//! Shared types, models and calculations for the Crop Cycle Manager
//!
//! This crate contains the record models, the per-crop-cycle indicator
//! calculator and the validation rules shared by the backend and the
//! WASM bindings.

pub mod assets;
pub mod indicators;
pub mod models;
pub mod types;
pub mod validation;

pub use assets::*;
pub use indicators::*;
pub use models::*;
pub use types::*;
pub use validation::*;
