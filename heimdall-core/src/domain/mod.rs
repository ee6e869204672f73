//! Core domain types
//!
//! These types are shared between the HTTP client (which produces them),
//! the stores (which hold and publish them) and any UI layer consuming
//! the stores.

pub mod config;
pub mod interval;
pub mod job;
pub mod settings;
