//! Cover letter generator service.
//!
//! Assembles a prompt from a resume and a target job description, sends it
//! to a locally hosted Ollama model, and serves the generated letter with
//! chat-style personalization on top.

pub mod config;
pub mod errors;
pub mod extract;
pub mod letter;
pub mod llm_client;
pub mod resume;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
