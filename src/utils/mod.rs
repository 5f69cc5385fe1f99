// Shared helpers: errors, configuration, validation and slice moves
pub mod config;
pub mod error;
pub mod slice_ops;
pub mod validation;
