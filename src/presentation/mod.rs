//! Presentation layer handling text commands and plain listings.
//!
//! Commands typed by the user are parsed and forwarded to the list manager;
//! the results are returned as lines of text for the caller to print.

pub mod input;
pub mod view;

pub use input::*;
pub use view::*;
