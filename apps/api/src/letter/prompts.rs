// All LLM prompt constants for the letter module.

/// Cover letter prompt template.
/// Replace: {word_limit}, {resume_text}, {job_description}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"
You are a professional cover letter writer. Write a compelling, personalized cover letter based on the resume and job description provided.

⚠️ Important instructions:
The goal is to create a professional, eager-to-learn, and concise cover letter.
    The cover letter must:

    1. Only include the technologies and experiences mentioned in the resume.
    2. Connect the technologies in the resume with those mentioned in the job description.
    3. If there are any technologies in the job description not mentioned in the resume, politely mention that the applicant is willing and eager to learn them.
    4. Make the tone of the cover letter enthusiastic and focused on giving their best to the work.
    5. Format the cover letter to be brief, as most hiring teams prefer short and to-the-point emails.
    6. Use a professional tone, avoiding any casual language and use words not more than {word_limit}.
    7. Use Email format, including a subject line and a greeting.


    Include the resume and job description below and generate the cover letter formatted as an email.

📄 Resume:
"""
{resume_text}
"""

🧾 Job Description:
"""
{job_description}
"""

✍️ Now, write the best possible cover letter based on these.
"#;

/// Personalization prompt template.
/// Replace: {current_cover_letter}, {user_request}
pub const PERSONALIZATION_PROMPT_TEMPLATE: &str = r#"
You are a professional cover letter writer. Here is the current cover letter:

{current_cover_letter}

The user has requested the following personalization:
{user_request}

Please update the cover letter accordingly, keeping it concise, short and professional.
"#;

pub fn build_cover_letter_prompt(
    resume_text: &str,
    job_description: &str,
    word_limit: u32,
) -> String {
    COVER_LETTER_PROMPT_TEMPLATE
        .replace("{word_limit}", &word_limit.to_string())
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", job_description)
}

pub fn build_personalization_prompt(current_cover_letter: &str, user_request: &str) -> String {
    PERSONALIZATION_PROMPT_TEMPLATE
        .replace("{current_cover_letter}", current_cover_letter)
        .replace("{user_request}", user_request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_letter_prompt_substitutes_all_placeholders() {
        let prompt = build_cover_letter_prompt("RESUME BODY", "JD BODY", 200);
        assert!(prompt.contains("RESUME BODY"));
        assert!(prompt.contains("JD BODY"));
        assert!(prompt.contains("not more than 200"));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_personalization_prompt_substitutes_all_placeholders() {
        let prompt = build_personalization_prompt("Dear team,", "Make it more formal");
        assert!(prompt.contains("Dear team,"));
        assert!(prompt.contains("Make it more formal"));
        assert!(!prompt.contains("{current_cover_letter}"));
        assert!(!prompt.contains("{user_request}"));
    }
}
