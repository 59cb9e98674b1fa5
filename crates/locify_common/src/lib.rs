//! Shared foundation for the Locify workspace.
//!
//! This crate holds the pieces every other Locify crate builds on: the
//! device and location models, the error types, the capability traits that
//! decouple the tracking core from any concrete runtime environment, and
//! the logging setup used by the agent binary.

pub mod error;
pub mod logging;
pub mod models;
pub mod services;
