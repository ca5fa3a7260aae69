//! Core domain + application logic for the TeraBox link-resolution relay bot.
//!
//! This crate is intentionally framework-agnostic. Telegram / MongoDB / the
//! external resolver live behind ports (traits) implemented in adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod gate;
pub mod links;
pub mod logging;
pub mod ports;
pub mod relay;
pub mod texts;

pub use errors::{Error, Result};
