//! Module related database queries
mod container;
mod my_module;

pub use container::*;
pub use my_module::*;
