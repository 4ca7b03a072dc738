//! Domain models for the Crop Cycle Manager

mod cost;
mod farm;
mod harvest;
mod improvement;
mod machinery;
mod operation;
mod safra;

pub use cost::*;
pub use farm::*;
pub use harvest::*;
pub use improvement::*;
pub use machinery::*;
pub use operation::*;
pub use safra::*;
