//! Command implementations

pub mod list;
pub mod read;
pub mod social;
