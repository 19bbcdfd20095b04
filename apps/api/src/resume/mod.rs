//! Resume processing — LLM cleanup pass and lightweight validation.

pub mod cleaner;
pub mod prompts;
pub mod validation;
