use axum::extract::Multipart;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::extraction::{DocumentKind, RawDocument};
use crate::pipeline::Submission;
use crate::scoring::ats::ExperienceLevel;

/// Checkbox and JSON-ish truthy values.
pub fn is_checked(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "on" | "true" | "1" | "yes"
    )
}

/// Blank means "not declared"; anything else must name a level.
pub fn parse_level(value: &str) -> Result<Option<ExperienceLevel>, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some).map_err(AppError::Validation)
}

fn has_extension(file_name: &str) -> bool {
    std::path::Path::new(file_name).extension().is_some()
}

/// Builds the file for a multipart file field. Empty file inputs are `None`.
/// A resume with an extension we cannot read is rejected; a job description
/// of that kind is dropped with a warning.
fn document_from_field(
    field_name: &str,
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: bytes::Bytes,
) -> Result<Option<RawDocument>, AppError> {
    if bytes.is_empty() {
        return Ok(None);
    }
    let file_name = file_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| format!("{field_name}-upload"));
    let document = RawDocument::new(file_name, content_type.as_deref(), bytes);
    if document.kind == DocumentKind::Unknown && has_extension(&document.file_name) {
        if field_name != "resume" {
            warn!(
                "Ignoring {} in field {field_name}: unsupported file type",
                document.file_name
            );
            return Ok(None);
        }
        return Err(AppError::UnsupportedMedia(format!(
            "{}: only PDF, DOCX or TXT files are supported",
            document.file_name
        )));
    }
    debug!(
        "Received {} ({:?}, {} bytes) in field {field_name}",
        document.file_name,
        document.kind,
        document.bytes.len()
    );
    Ok(Some(document))
}

/// Reads the shared upload form used by both apps.
///
/// Fields: `resume` (file), `resume_text`, `jd` (file), `jd_text`, `role`,
/// `experience_level`, `polish` (checkbox). Unknown fields are drained and ignored.
pub async fn read_submission(mut multipart: Multipart) -> Result<Submission, AppError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "resume" | "jd" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                let document = document_from_field(&name, file_name, content_type, bytes)?;
                if name == "resume" {
                    submission.resume_file = document;
                } else {
                    submission.jd_file = document;
                }
            }
            "resume_text" => submission.resume_text = Some(field.text().await?),
            "jd_text" => submission.jd_text = Some(field.text().await?),
            "role" => submission.role = field.text().await?.trim().to_string(),
            "experience_level" => {
                submission.experience_level = parse_level(&field.text().await?)?;
            }
            "polish" => submission.polish = is_checked(&field.text().await?),
            _ => {
                field.bytes().await?;
            }
        }
    }

    Ok(submission)
}
