use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::capabilities::{Capabilities, CapabilityStatus};
use crate::errors::AppError;
use crate::interview::answers::QuestionAnswerPair;
use crate::interview::questions::{generate_questions, QuestionSet};
use crate::pipeline::ats::{build_ats_report, AtsReport};
use crate::pipeline::coaching::{answer_question, coach_answer, CoachReport};
use crate::pipeline::review::{build_review, ReviewReport};
use crate::pipeline::{detect_enriched_skills, ResolvedResume, ResumeResolution, Submission};
use crate::routes::upload::read_submission;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CapabilitiesResponse {
    pub capabilities: Vec<CapabilityStatus>,
}

#[derive(Deserialize)]
pub struct QuestionsRequest {
    pub resume_text: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Deserialize)]
pub struct AnswerRequest {
    pub question: String,
    pub resume_text: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub polish: bool,
}

#[derive(Deserialize)]
pub struct CoachRequest {
    pub answer: String,
    #[serde(default)]
    pub polish: bool,
}

/// Resume text for the JSON endpoints, which have no fallback page.
async fn require_resume(
    submission: &Submission,
    capabilities: &Capabilities,
) -> Result<ResolvedResume, AppError> {
    match submission.resolve_resume(capabilities).await {
        ResumeResolution::Ready(resume) => Ok(resume),
        ResumeResolution::ExtractionFailed {
            file_name,
            attempts,
        } => Err(AppError::ExtractionFailed {
            file_name,
            attempts,
        }),
        ResumeResolution::Missing => Err(AppError::Validation(
            "Provide a resume file or resume_text".to_string(),
        )),
    }
}

/// GET /api/v1/capabilities
pub async fn handle_capabilities(State(state): State<AppState>) -> Json<CapabilitiesResponse> {
    Json(CapabilitiesResponse {
        capabilities: state.capabilities.report(),
    })
}

/// POST /api/v1/review
pub async fn handle_review(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ReviewReport>, AppError> {
    let submission = read_submission(multipart).await?;
    let resume = require_resume(&submission, &state.capabilities).await?;
    let jd = submission.resolve_jd(&state.capabilities).await;
    let report = build_review(resume, jd.as_deref(), &submission.role, &state.capabilities).await;
    Ok(Json(report))
}

/// POST /api/v1/ats/score
pub async fn handle_ats_score(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AtsReport>, AppError> {
    let submission = read_submission(multipart).await?;
    let resume = require_resume(&submission, &state.capabilities).await?;
    let jd = submission.resolve_jd(&state.capabilities).await;
    let report = build_ats_report(
        resume,
        jd.as_deref(),
        submission.experience_level,
        &state.capabilities,
    )
    .await;
    Ok(Json(report))
}

/// POST /api/v1/interview/questions
pub async fn handle_questions(
    State(state): State<AppState>,
    Json(req): Json<QuestionsRequest>,
) -> Json<QuestionSet> {
    let (skills, _) = detect_enriched_skills(&req.resume_text, &state.capabilities).await;
    Json(generate_questions(&req.resume_text, &skills, &req.role))
}

/// POST /api/v1/interview/answer
pub async fn handle_answer(
    State(state): State<AppState>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<QuestionAnswerPair>, AppError> {
    if req.question.trim().is_empty() {
        return Err(AppError::Validation("question must not be empty".to_string()));
    }
    let pair = answer_question(
        &req.question,
        &req.resume_text,
        &req.role,
        req.polish,
        &state.capabilities,
    )
    .await;
    Ok(Json(pair))
}

/// POST /api/v1/coach/score
pub async fn handle_coach(
    State(state): State<AppState>,
    Json(req): Json<CoachRequest>,
) -> Json<CoachReport> {
    Json(coach_answer(&req.answer, req.polish, &state.capabilities).await)
}
