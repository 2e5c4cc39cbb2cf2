pub mod public_key;
pub mod send;
