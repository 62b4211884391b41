//! Shared utilities: classification, address extraction, code generation.

pub mod client_ip;
pub mod code_generator;
pub mod url_normalizer;
pub mod user_agent;
