//! Port traits (interfaces) for dependency injection

pub mod endpoint;

pub use endpoint::{PeerEndpoint, SubmitOutcome};
