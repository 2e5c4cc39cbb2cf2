//! The two protocol roles

pub mod orchestrator;
pub mod responder;

pub use orchestrator::{seal_envelope, ExchangeState, Orchestrator, DEFAULT_TIMEOUT};
pub use responder::handle;
