//! Core data structures for the Stacks analytics library
//!
//! This crate owns everything that is not a computation: the record-oriented
//! data model, the field-selection configuration supplied by the caller, and
//! JSON export of computed results.

pub mod config;
pub mod data;
pub mod error;
pub mod export;

pub use config::AnalyticsConfig;
pub use error::{Result, StacksError};
