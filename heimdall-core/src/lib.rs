//! Heimdall Core
//!
//! Core types shared by the Heimdall dashboard client.
//!
//! This crate contains:
//! - Job types: opaque job summaries and the snapshot published by the poller
//! - Config types: the three-state result of loading the server configuration
//! - Settings types: the user preference document and its defaults

pub mod domain;
