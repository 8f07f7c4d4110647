//! shoplist - Shopping List Library
//!
//! A local shopping list manager: named, priced items kept in order, marked
//! purchased, totalled against an advisory spending limit, and shared as a
//! `mailto:` link. The list is persisted to a local snapshot after every change.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
