use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::intelligence::*;
use crate::state::AppState;
use crate::store;

#[utoipa::path(
    post,
    path = "/pdfs/summarize-text",
    tag = "Intelligence",
    operation_id = "summarizeText",
    summary = "Summarize text",
    description = "Asks the language model for a summary of the supplied text. Nothing is stored.",
    request_body = SummarizeRequest,
    responses(
        (status = 200, description = "Summary", body = SummaryResponse),
        (status = 422, description = "Malformed body (UNPROCESSABLE_ENTITY)", body = ErrorBody),
        (status = 500, description = "LLM provider failure (UPSTREAM_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(chars = payload.text.len()))]
pub async fn summarize_text(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SummarizeRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    let summary = state.intelligence.summarize(&payload.text).await?;
    Ok(Json(SummaryResponse { summary }))
}

#[utoipa::path(
    post,
    path = "/pdfs/qa-pdf/{id}",
    tag = "Intelligence",
    operation_id = "askPdf",
    summary = "Answer a question about a PDF",
    description = "Loads the record's file, retrieves the passages most similar to the question \
        and has the language model answer from them. The response body is the answer as a JSON string.",
    params(("id" = i32, Path, description = "Record ID")),
    request_body = QuestionRequest,
    responses(
        (status = 200, description = "Answer", body = String),
        (status = 404, description = "PDF not found (NOT_FOUND)", body = ErrorBody),
        (status = 422, description = "Malformed body (UNPROCESSABLE_ENTITY)", body = ErrorBody),
        (status = 500, description = "Load, extraction or LLM failure (UPSTREAM_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn ask_pdf(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<QuestionRequest>,
) -> Result<Json<String>, AppError> {
    let record = store::get(&state.db, id)
        .await?
        .ok_or_else(AppError::pdf_not_found)?;

    let answer = state
        .intelligence
        .answer_question(&record.file, &payload.question)
        .await?;
    Ok(Json(answer))
}
