//! HTTP handlers

mod cost;
mod farm;
mod harvest;
mod health;
mod improvement;
mod machinery;
mod operation;
mod results;
mod safra;

pub use cost::*;
pub use farm::*;
pub use harvest::*;
pub use health::*;
pub use improvement::*;
pub use machinery::*;
pub use operation::*;
pub use results::*;
pub use safra::*;
