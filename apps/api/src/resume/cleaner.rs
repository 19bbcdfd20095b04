//! LLM-backed resume cleanup.
//!
//! The model is asked to reformat the raw extracted text; its reply tends to
//! wrap the result in `---` fences, lead with a "Here is ..." preamble, or
//! (for reasoning models) include `<think>` blocks. `extract_cleaned_text`
//! peels those back. Cleaning is best-effort: on any LLM failure the raw
//! text is returned unchanged.

use regex::Regex;
use tracing::warn;

use crate::llm_client::TextGenerator;
use crate::resume::prompts::build_cleaning_prompt;

/// Runs the cleaning pass. Never fails: an unreachable or misbehaving model
/// degrades to the raw text so letter generation can still proceed.
pub async fn clean_resume(llm: &dyn TextGenerator, resume_text: &str) -> String {
    if resume_text.trim().is_empty() {
        return String::new();
    }

    let prompt = build_cleaning_prompt(resume_text);

    match llm.generate(&prompt).await {
        Ok(response) => {
            let cleaned = extract_cleaned_text(&response);
            if cleaned.is_empty() {
                warn!("Resume cleaning produced no usable text, keeping raw resume");
                resume_text.to_string()
            } else {
                cleaned
            }
        }
        Err(e) => {
            warn!("Resume cleaning failed ({e}), keeping raw resume");
            resume_text.to_string()
        }
    }
}

/// Extracts the cleaned resume from a model reply.
///
/// Preference order:
/// 1. content between the first `---` fence pair
/// 2. content after a "Here is ..."-style preamble line
/// 3. the reply with any `<think>...</think>` blocks removed
pub fn extract_cleaned_text(response: &str) -> String {
    let dashes = Regex::new(r"(?s)---\s*\n(.*?)\n---").expect("dash fence regex is valid");
    if let Some(caps) = dashes.captures(response) {
        return caps[1].trim().to_string();
    }

    let preamble = Regex::new(r"(?is)Here (?:is|'s|’s)[^\n]*:\s*\n+(.*)")
        .expect("preamble regex is valid");
    if let Some(caps) = preamble.captures(response) {
        return caps[1].trim().to_string();
    }

    let think = Regex::new(r"(?is)<think>.*?</think>").expect("think block regex is valid");
    think.replace_all(response, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_between_dash_fences() {
        let response = "Sure, here you go:\n---\nJane Doe\nRust Engineer\n---\nLet me know!";
        assert_eq!(extract_cleaned_text(response), "Jane Doe\nRust Engineer");
    }

    #[test]
    fn test_extract_after_here_is_preamble() {
        let response = "Here is the cleaned resume:\n\nJane Doe\nRust Engineer";
        assert_eq!(extract_cleaned_text(response), "Jane Doe\nRust Engineer");
    }

    #[test]
    fn test_extract_strips_think_blocks() {
        let response = "<think>formatting plan goes here</think>\nJane Doe";
        assert_eq!(extract_cleaned_text(response), "Jane Doe");
    }

    #[test]
    fn test_extract_passthrough_plain_reply() {
        assert_eq!(extract_cleaned_text("Jane Doe\n"), "Jane Doe");
    }
}
