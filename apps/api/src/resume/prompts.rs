// LLM prompt constants for the resume cleaning pass.

/// Resume cleaning prompt template. Replace `{resume_text}` before sending.
pub const RESUME_CLEANING_PROMPT_TEMPLATE: &str = r#"You are a professional resume formatter. Clean and format the following resume text:

{resume_text}

Please:
1. Remove any unnecessary formatting artifacts
2. Organize the content properly
3. Ensure consistency in formatting
4. Keep all important information intact
5. Make it professional and readable

Return only the cleaned resume text.
"#;

pub fn build_cleaning_prompt(resume_text: &str) -> String {
    RESUME_CLEANING_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}
