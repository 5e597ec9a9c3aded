//! Axum route handler for the resume processing endpoint.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::QueryRejection,
        Multipart, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::processing::{process_resume, ProcessedResult, Upload};
use crate::state::AppState;

const FILE_FIELD: &str = "file";
const JOB_DESCRIPTION_FIELD: &str = "job_description";

#[derive(Debug, Default, Deserialize)]
pub struct ProcessQuery {
    pub job_description: Option<String>,
}

#[derive(Debug, Default)]
struct ResumeForm {
    upload: Option<Upload>,
    job_description: Option<String>,
}

/// POST /process-resume/
///
/// Multipart upload: required `file`, optional `job_description` (form field
/// or query parameter; the form field wins).
pub async fn handle_process_resume(
    State(state): State<AppState>,
    query: Result<Query<ProcessQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ProcessedResult>, AppError> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    let multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;
    let form = read_form(multipart).await?;

    let upload = form.upload.ok_or_else(|| {
        AppError::UnprocessableEntity(format!("Missing required multipart field '{FILE_FIELD}'"))
    })?;
    let job_description = form
        .job_description
        .or(query.job_description)
        .filter(|jd| !jd.trim().is_empty());

    let result = process_resume(
        state.extractor.clone(),
        state.recognizer.as_ref(),
        upload,
        job_description.as_deref(),
    )
    .await?;

    Ok(Json(result))
}

/// Drains the multipart stream, keeping the fields the endpoint understands.
/// Unknown fields are skipped.
async fn read_form(mut multipart: Multipart) -> Result<ResumeForm, AppError> {
    let mut form = ResumeForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let filename = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                form.upload = Some(Upload {
                    filename,
                    content_type,
                    bytes,
                });
            }
            Some(JOB_DESCRIPTION_FIELD) => {
                form.job_description = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Keeps the body-limit case distinct; every other multipart failure is a 400.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}
