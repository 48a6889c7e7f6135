//! Domain models for the rx-analyzer system.

mod analysis;
mod entity;
mod link;

pub use analysis::*;
pub use entity::*;
pub use link::*;
