//! Axum route handlers for the Letter API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{extract_text, DocumentKind};
use crate::letter::generator::{generate_cover_letter, personalize_letter};
use crate::letter::session::ChatTurn;
use crate::resume::cleaner::clean_resume;
use crate::resume::validation::{section_report, validate_resume_text, SectionReport};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreateLetterResponse {
    pub session_id: Uuid,
    pub cover_letter: String,
    pub resume_report: SectionReport,
}

#[derive(Debug, Serialize)]
pub struct LetterDetailResponse {
    pub session_id: Uuid,
    pub cover_letter: String,
    pub refinement_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RefineRequest {
    pub request: String,
}

#[derive(Debug, Serialize)]
pub struct RefineResponse {
    pub session_id: Uuid,
    pub cover_letter: String,
    pub refinement_count: usize,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub session_id: Uuid,
    pub history: Vec<ChatTurn>,
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart form
// ────────────────────────────────────────────────────────────────────────────

/// One uploaded file part, with whatever identity hints the client sent.
struct UploadedFile {
    content_type: Option<String>,
    filename: Option<String>,
    data: Bytes,
}

impl UploadedFile {
    /// Extracts plain text, dispatching on content type then file name.
    fn into_text(self, label: &str) -> Result<String, AppError> {
        let kind = DocumentKind::resolve(self.content_type.as_deref(), self.filename.as_deref())
            .ok_or_else(|| {
                AppError::UnsupportedMediaType(format!(
                    "{label} must be a PDF, DOCX, or TXT file"
                ))
            })?;
        extract_text(kind, &self.data)
    }
}

#[derive(Default)]
struct LetterForm {
    resume_file: Option<UploadedFile>,
    job_file: Option<UploadedFile>,
    resume_text: Option<String>,
    job_text: Option<String>,
    clean_resume: Option<bool>,
}

async fn read_form(mut multipart: Multipart) -> Result<LetterForm, AppError> {
    let mut form = LetterForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "resume" | "job_description" => {
                let content_type = field.content_type().map(str::to_string);
                let filename = field.file_name().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read '{name}': {e}")))?;
                let file = UploadedFile {
                    content_type,
                    filename,
                    data,
                };
                if name == "resume" {
                    form.resume_file = Some(file);
                } else {
                    form.job_file = Some(file);
                }
            }
            "resume_text" => form.resume_text = Some(read_text_field(field, &name).await?),
            "job_description_text" => form.job_text = Some(read_text_field(field, &name).await?),
            "clean_resume" => {
                let raw = read_text_field(field, &name).await?;
                form.clean_resume = Some(raw.trim().parse::<bool>().map_err(|_| {
                    AppError::Validation("clean_resume must be 'true' or 'false'".to_string())
                })?);
            }
            other => {
                tracing::debug!("Ignoring unknown form field '{other}'");
            }
        }
    }

    Ok(form)
}

async fn read_text_field(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read '{name}': {e}")))
}

/// Pasted text wins over an uploaded file, matching the original UI rule.
fn resolve_source(
    text: Option<String>,
    file: Option<UploadedFile>,
    label: &str,
    missing_message: &str,
) -> Result<String, AppError> {
    if let Some(text) = text {
        let text = text.trim().to_string();
        if !text.is_empty() {
            return Ok(text);
        }
    }
    match file {
        Some(file) => file.into_text(label),
        None => Err(AppError::Validation(missing_message.to_string())),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/letters
///
/// Full pipeline: extract resume + job description → validate → clean the
/// resume (unless disabled) → generate the letter → open a session.
pub async fn handle_create_letter(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CreateLetterResponse>, AppError> {
    let form = read_form(multipart).await?;
    let clean = form.clean_resume.unwrap_or(true);

    let resume_text = resolve_source(
        form.resume_text,
        form.resume_file,
        "resume",
        "Please upload your resume file or paste resume text.",
    )?;
    let job_description = resolve_source(
        form.job_text,
        form.job_file,
        "job_description",
        "Please upload the job description file or paste job description text.",
    )?;

    if !validate_resume_text(&resume_text) {
        return Err(AppError::UnprocessableEntity(
            "The resume text is too short or does not look like a resume".to_string(),
        ));
    }

    let resume_report = section_report(&resume_text);

    let resume_text = if clean {
        clean_resume(state.llm.as_ref(), &resume_text).await
    } else {
        resume_text
    };

    let letter = generate_cover_letter(
        state.llm.as_ref(),
        &resume_text,
        &job_description,
        state.config.max_word_limit,
    )
    .await?;

    let session = state
        .sessions
        .create(resume_text, job_description, letter)
        .await;

    Ok(Json(CreateLetterResponse {
        session_id: session.id,
        cover_letter: session.current_letter,
        resume_report,
    }))
}

/// GET /api/v1/letters/:id
///
/// Returns the current letter for a session.
pub async fn handle_get_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LetterDetailResponse>, AppError> {
    let session = state.sessions.get(id).await?;

    Ok(Json(LetterDetailResponse {
        session_id: session.id,
        refinement_count: session.refinement_count(),
        cover_letter: session.current_letter,
        created_at: session.created_at,
        updated_at: session.updated_at,
    }))
}

/// POST /api/v1/letters/:id/refine
///
/// Applies one personalization request ("make it more formal", "add a
/// sentence about teamwork") to the session's current letter.
pub async fn handle_refine_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RefineRequest>,
) -> Result<Json<RefineResponse>, AppError> {
    let user_request = request.request.trim();
    if user_request.is_empty() {
        return Err(AppError::Validation(
            "request cannot be empty".to_string(),
        ));
    }

    let session = state.sessions.get(id).await?;

    let updated = personalize_letter(
        state.llm.as_ref(),
        &session.current_letter,
        user_request,
    )
    .await?;

    let session = state
        .sessions
        .apply_refinement(id, user_request, updated)
        .await?;

    Ok(Json(RefineResponse {
        session_id: session.id,
        refinement_count: session.refinement_count(),
        cover_letter: session.current_letter,
    }))
}

/// GET /api/v1/letters/:id/history
///
/// Returns the full personalization chat history for a session.
pub async fn handle_get_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HistoryResponse>, AppError> {
    let session = state.sessions.get(id).await?;

    Ok(Json(HistoryResponse {
        session_id: session.id,
        history: session.history,
    }))
}
