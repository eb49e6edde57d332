use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::storage::ObjectKey;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::query::AppQuery;
use crate::models::pdf::*;
use crate::state::AppState;
use crate::store::{self, NewPdf};
use crate::utils::filename::validate_pdf_filename;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn upload_body_limit(max_object_size: u64) -> DefaultBodyLimit {
    let max = usize::try_from(max_object_size).unwrap_or(usize::MAX);
    DefaultBodyLimit::max(max.saturating_add(MULTIPART_OVERHEAD))
}

#[utoipa::path(
    post,
    path = "/pdfs",
    tag = "PDFs",
    operation_id = "createPdf",
    summary = "Create a PDF record",
    description = "Stores a record whose `file` reference is supplied by the client. No bytes are uploaded.",
    request_body = CreatePdfRequest,
    responses(
        (status = 201, description = "Record created", body = PdfResponse),
        (status = 422, description = "Malformed body (UNPROCESSABLE_ENTITY)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_pdf(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreatePdfRequest>,
) -> Result<impl IntoResponse, AppError> {
    let model = store::create(&state.db, payload.into()).await?;
    tracing::info!(id = model.id, "PDF record created");
    Ok((StatusCode::CREATED, Json(PdfResponse::from(model))))
}

#[utoipa::path(
    post,
    path = "/pdfs/upload",
    tag = "PDFs",
    operation_id = "uploadPdf",
    summary = "Upload a PDF",
    description = "Stores the `file` multipart field in object storage and creates a record pointing at it. \
        Only filenames ending in `.pdf` are accepted; the check happens before anything is stored.",
    request_body(content_type = "multipart/form-data", description = "PDF file in the `file` field"),
    responses(
        (status = 201, description = "Uploaded and recorded", body = PdfResponse),
        (status = 400, description = "Missing file, bad filename or non-PDF (VALIDATION_ERROR)", body = ErrorBody),
        (status = 413, description = "File too large (PAYLOAD_TOO_LARGE)", body = ErrorBody),
        (status = 500, description = "Object storage failure (UPSTREAM_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart), fields(filename))]
pub async fn upload_pdf(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let raw_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;
        let filename = validate_pdf_filename(&raw_name)
            .map_err(|e| AppError::Validation(e.message().into()))?
            .to_string();
        tracing::Span::current().record("filename", filename.as_str());

        let data = field.bytes().await.map_err(multipart_error)?;
        upload = Some((filename, data.to_vec()));
        break;
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;

    let stored = state.objects.store(&data, &filename).await?;
    tracing::info!(
        backend = state.objects.backend_name(),
        key = %stored.key,
        size = data.len(),
        "PDF stored"
    );

    let model = store::create(
        &state.db,
        NewPdf {
            name: filename,
            selected: false,
            file: stored.reference,
            storage_key: Some(stored.key.to_string()),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(PdfResponse::from(model))))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("Multipart error: {}", err.body_text()))
    }
}

#[utoipa::path(
    get,
    path = "/pdfs",
    tag = "PDFs",
    operation_id = "listPdfs",
    summary = "List PDF records",
    description = "Returns every record in id order, or only those whose `selected` flag matches the filter.",
    params(PdfListQuery),
    responses(
        (status = 200, description = "Records", body = Vec<PdfResponse>),
        (status = 422, description = "Malformed query (UNPROCESSABLE_ENTITY)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(selected = ?query.selected))]
pub async fn list_pdfs(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PdfListQuery>,
) -> Result<Json<Vec<PdfResponse>>, AppError> {
    let records = store::list(&state.db, query.selected).await?;
    Ok(Json(records.into_iter().map(PdfResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/pdfs/{id}",
    tag = "PDFs",
    operation_id = "getPdf",
    summary = "Get a PDF record",
    params(("id" = i32, Path, description = "Record ID")),
    responses(
        (status = 200, description = "Record", body = PdfResponse),
        (status = 404, description = "PDF not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_pdf(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PdfResponse>, AppError> {
    let model = store::get(&state.db, id)
        .await?
        .ok_or_else(AppError::pdf_not_found)?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/pdfs/{id}",
    tag = "PDFs",
    operation_id = "updatePdf",
    summary = "Update a PDF record",
    description = "Partial update: only the fields present in the body change.",
    params(("id" = i32, Path, description = "Record ID")),
    request_body = UpdatePdfRequest,
    responses(
        (status = 200, description = "Updated record", body = PdfResponse),
        (status = 404, description = "PDF not found (NOT_FOUND)", body = ErrorBody),
        (status = 422, description = "Malformed body (UNPROCESSABLE_ENTITY)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_pdf(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdatePdfRequest>,
) -> Result<Json<PdfResponse>, AppError> {
    let model = store::update(&state.db, id, payload.into())
        .await?
        .ok_or_else(AppError::pdf_not_found)?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/pdfs/{id}",
    tag = "PDFs",
    operation_id = "deletePdf",
    summary = "Delete a PDF record and its stored file",
    description = "Removes the uploaded object from storage first (when the record has one), then the record. \
        If storage deletion fails the record is kept.",
    params(("id" = i32, Path, description = "Record ID")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "PDF not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Object storage failure (UPSTREAM_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_pdf(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    let record = store::get(&state.db, id)
        .await?
        .ok_or_else(AppError::pdf_not_found)?;

    match record.storage_key.as_deref() {
        Some(raw_key) => {
            let key = ObjectKey::parse(raw_key).map_err(|e| {
                AppError::Internal(format!("Stored key for PDF {id} is invalid: {e}"))
            })?;
            if !state.objects.delete(&key).await? {
                tracing::warn!(key = %key, "Stored object was already gone");
            }
        }
        None => tracing::debug!("Record has no stored object; skipping storage delete"),
    }

    if !store::delete(&state.db, id).await? {
        return Err(AppError::pdf_not_found());
    }

    tracing::info!("PDF deleted");
    Ok(Json(MessageResponse {
        message: "PDF successfully deleted from storage and database".into(),
    }))
}
