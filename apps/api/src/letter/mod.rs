//! Cover letter generation and post-generation personalization.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod session;
