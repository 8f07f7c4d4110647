//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and the stores in the
//! infrastructure layer, owning the mounted list and the notifications user
//! operations raise.

pub mod state;

pub use state::*;
