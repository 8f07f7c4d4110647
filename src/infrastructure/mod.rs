//! Infrastructure layer providing external service integrations.
//!
//! This module contains the local snapshot store the list is persisted to
//! and the configuration file loader.

pub mod config;
pub mod persistence;

pub use config::*;
pub use persistence::*;
