/*
 * Responsibility
 * - /patients 系 CRUD handler
 * - Path/Query/Json を extractor で受け、DTO validation → repo 呼び出し
 * - service 結果 → HTTP status の対応だけを持つ (recovery はしない)
 * - 削除は inactivate (soft delete): レコードは残り、active = false になる
 */
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
};

use crate::{
    api::{
        dto::patients::{Page, PageRequest, PatientRequest, PatientResponse},
        extractors::AuthCtxExtractor,
        negotiate::{Negotiated, ResponseFormat},
    },
    error::AppError,
    repos::patient_repo,
    state::AppState,
};

// Location ヘッダの組み立てに使う (router の nest 先と一致させること)
const PATIENTS_PATH: &str = "/api/patients";

pub async fn list_patients(
    State(state): State<AppState>,
    format: ResponseFormat,
    AuthCtxExtractor(_auth): AuthCtxExtractor,
    Query(req): Query<PageRequest>,
) -> Result<Negotiated<Page<PatientResponse>>, AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_PAGE_REQUEST", m))?;

    let limit = req.limit();
    let rows = patient_repo::list(&state.db, limit, req.offset(), req.sort_direction()).await?;
    let total = patient_repo::count(&state.db).await?;

    let content = rows.into_iter().map(PatientResponse::from).collect();
    let page = Page::new(content, req.page, limit, total);

    Ok(Negotiated::new(format, "page", page))
}

pub async fn list_active_patients(
    State(state): State<AppState>,
    format: ResponseFormat,
    AuthCtxExtractor(_auth): AuthCtxExtractor,
) -> Result<Negotiated<Vec<PatientResponse>>, AppError> {
    let rows = patient_repo::list_active(&state.db).await?;
    let res: Vec<PatientResponse> = rows.into_iter().map(PatientResponse::from).collect();

    Ok(Negotiated::new(format, "patient", res))
}

pub async fn get_patient(
    State(state): State<AppState>,
    format: ResponseFormat,
    AuthCtxExtractor(_auth): AuthCtxExtractor,
    Path(id): Path<i64>,
) -> Result<Negotiated<PatientResponse>, AppError> {
    let row = patient_repo::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("patient"))?;

    Ok(Negotiated::new(format, "patient", row.into()))
}

pub async fn create_patient(
    State(state): State<AppState>,
    format: ResponseFormat,
    AuthCtxExtractor(_auth): AuthCtxExtractor,
    Json(req): Json<PatientRequest>,
) -> Result<
    (
        StatusCode,
        [(header::HeaderName, String); 1],
        Negotiated<PatientResponse>,
    ),
    AppError,
> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_PATIENT", m))?;

    let row = patient_repo::create(
        &state.db,
        &req.name,
        req.email.as_deref(),
        req.phone.as_deref(),
        req.birth_date,
        req.gender.as_deref(),
    )
    .await?;

    let location = format!("{PATIENTS_PATH}/{}", row.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Negotiated::new(format, "patient", row.into()),
    ))
}

pub async fn update_patient(
    State(state): State<AppState>,
    format: ResponseFormat,
    AuthCtxExtractor(_auth): AuthCtxExtractor,
    Path(id): Path<i64>,
    Json(req): Json<PatientRequest>,
) -> Result<Negotiated<PatientResponse>, AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_PATIENT", m))?;

    let row = patient_repo::update(
        &state.db,
        id,
        &req.name,
        req.email.as_deref(),
        req.phone.as_deref(),
        req.birth_date,
        req.gender.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::not_found("patient"))?;

    Ok(Negotiated::new(format, "patient", row.into()))
}

pub async fn inactivate_patient(
    State(state): State<AppState>,
    AuthCtxExtractor(_auth): AuthCtxExtractor,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let touched = patient_repo::inactivate(&state.db, id).await?;

    if touched {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("patient"))
    }
}
