use askama::Template;
use axum::{
    extract::{Multipart, State},
    response::Html,
    Form,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::pipeline::ats::build_ats_report;
use crate::pipeline::coaching::{answer_question, coach_answer};
use crate::pipeline::review::build_review;
use crate::pipeline::{ResumeResolution, Submission};
use crate::routes::upload::{is_checked, read_submission};
use crate::state::AppState;
use crate::views::{
    answer_context, level_options, AnswerPage, AtsPage, CoachPage, FallbackPage, FallbackTarget,
    IndexPage, ReviewPage, ATS_TARGET, REVIEW_TARGET,
};

#[derive(Deserialize)]
pub struct AnswerForm {
    pub question: String,
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub role: String,
    pub polish: Option<String>,
}

#[derive(Deserialize)]
pub struct CoachForm {
    #[serde(default)]
    pub question: String,
    pub answer: String,
    pub polish: Option<String>,
}

fn checkbox(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(is_checked)
}

/// Renders the paste-your-text page for a submission that produced no resume text.
async fn render_fallback(
    state: &AppState,
    target: &FallbackTarget,
    submission: &Submission,
    resolution: ResumeResolution,
) -> Result<Html<String>, AppError> {
    let (message, file_name, attempts) = match resolution {
        ResumeResolution::ExtractionFailed {
            file_name,
            attempts,
        } => (
            format!(
                "No text could be extracted from {file_name}. \
                 Paste the resume text below to continue."
            ),
            Some(file_name),
            attempts,
        ),
        _ => (
            "Upload a PDF or DOCX resume, or paste its text.".to_string(),
            None,
            Vec::new(),
        ),
    };
    info!("Showing {} fallback page", target.title);

    let page = FallbackPage {
        capabilities: state.capabilities.report(),
        title: target.title,
        action: target.action,
        message,
        file_name,
        attempts,
        role: submission.role.clone(),
        levels: level_options(submission.experience_level),
        jd_text: submission
            .resolve_jd(&state.capabilities)
            .await
            .unwrap_or_default(),
        polish: submission.polish,
    };
    Ok(Html(page.render()?))
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let page = IndexPage {
        capabilities: state.capabilities.report(),
        levels: level_options(None),
        polish_available: state.capabilities.polisher.is_available(),
    };
    Ok(Html(page.render()?))
}

/// POST /review
pub async fn handle_review_page(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let submission = read_submission(multipart).await?;
    let caps = &state.capabilities;

    let resume = match submission.resolve_resume(caps).await {
        ResumeResolution::Ready(resume) => resume,
        other => return render_fallback(&state, &REVIEW_TARGET, &submission, other).await,
    };
    let jd = submission.resolve_jd(caps).await;
    let resume_text = resume.text.clone();
    let report = build_review(resume, jd.as_deref(), &submission.role, caps).await;

    let page = ReviewPage::new(
        caps.report(),
        report,
        &resume_text,
        &submission.role,
        caps.polisher.is_available(),
    );
    Ok(Html(page.render()?))
}

/// POST /review/answer
pub async fn handle_answer_page(
    State(state): State<AppState>,
    Form(form): Form<AnswerForm>,
) -> Result<Html<String>, AppError> {
    if form.question.trim().is_empty() {
        return Err(AppError::Validation("question must not be empty".to_string()));
    }
    let caps = &state.capabilities;
    let pair = answer_question(
        &form.question,
        &form.resume_text,
        &form.role,
        checkbox(&form.polish),
        caps,
    )
    .await;

    let page = AnswerPage {
        capabilities: caps.report(),
        pair,
        answer_context: answer_context(&form.resume_text),
        role: form.role.trim().to_string(),
        polish_available: caps.polisher.is_available(),
    };
    Ok(Html(page.render()?))
}

/// POST /coach
pub async fn handle_coach_page(
    State(state): State<AppState>,
    Form(form): Form<CoachForm>,
) -> Result<Html<String>, AppError> {
    let caps = &state.capabilities;
    let report = coach_answer(&form.answer, checkbox(&form.polish), caps).await;
    let page = CoachPage::new(
        caps.report(),
        form.question.trim().to_string(),
        form.answer,
        report,
    );
    Ok(Html(page.render()?))
}

/// POST /ats
pub async fn handle_ats_page(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let submission = read_submission(multipart).await?;
    let caps = &state.capabilities;

    let resume = match submission.resolve_resume(caps).await {
        ResumeResolution::Ready(resume) => resume,
        other => return render_fallback(&state, &ATS_TARGET, &submission, other).await,
    };
    let jd = submission.resolve_jd(caps).await;
    let report = build_ats_report(resume, jd.as_deref(), submission.experience_level, caps).await;

    let page = AtsPage::new(caps.report(), report);
    Ok(Html(page.render()?))
}
