//! Cover letter generation — the prompt-assembly and LLM-call core.
//!
//! Flow: extracted resume text + job description → prompt → Ollama →
//! trimmed letter. Personalization reuses the same path with the
//! current letter and the user's request.

use tracing::info;

use crate::errors::AppError;
use crate::letter::prompts::{build_cover_letter_prompt, build_personalization_prompt};
use crate::llm_client::TextGenerator;

/// Generates the first cover letter for a resume / job description pair.
pub async fn generate_cover_letter(
    llm: &dyn TextGenerator,
    resume_text: &str,
    job_description: &str,
    word_limit: u32,
) -> Result<String, AppError> {
    let prompt = build_cover_letter_prompt(resume_text, job_description, word_limit);

    info!(
        "Generating cover letter (resume {} chars, jd {} chars)",
        resume_text.len(),
        job_description.len()
    );

    let letter = llm
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Cover letter generation failed: {e}")))?;

    Ok(letter.trim().to_string())
}

/// Rewrites the current letter according to a user personalization request.
pub async fn personalize_letter(
    llm: &dyn TextGenerator,
    current_letter: &str,
    user_request: &str,
) -> Result<String, AppError> {
    let prompt = build_personalization_prompt(current_letter, user_request);

    info!("Personalizing cover letter ({} char request)", user_request.len());

    let letter = llm
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Personalization failed: {e}")))?;

    Ok(letter.trim().to_string())
}
