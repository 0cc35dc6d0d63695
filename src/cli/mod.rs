//! CLI command implementations

pub mod check;
pub mod context;
pub mod policy;
pub mod style;
pub mod validate;
