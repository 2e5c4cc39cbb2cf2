//! Courier Types - Pure type definitions shared by client and server
//!
//! This crate contains only data types and their JSON shapes, with no crypto
//! or async runtime dependencies.

pub mod api;
pub mod envelope;
pub mod keys;

pub use api::*;
pub use envelope::*;
pub use keys::*;
