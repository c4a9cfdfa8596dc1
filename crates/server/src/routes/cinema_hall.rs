use crate::{
    dtos::catalog::{CinemaHallRequest, CinemaHallResponse},
    error::{ApiError, ErrorResponse},
    routes::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::cinema_hall::CinemaHallService;

/// List all cinema halls with their capacity
#[utoipa::path(
    get,
    path = "/cinema-halls",
    responses(
        (status = 200, description = "Cinema halls ordered by id", body = Vec<CinemaHallResponse>),
        (status = 401, description = "Unauthorized - invalid or missing JWT")
    ),
    security(("jwt" = [])),
    tag = "Cinema halls"
)]
pub async fn list_cinema_halls(
    State(state): State<AppState>,
) -> Result<Json<Vec<CinemaHallResponse>>, ApiError> {
    let halls = CinemaHallService::list(&state.db).await?;
    Ok(Json(halls.into_iter().map(CinemaHallResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/cinema-halls/{id}",
    params(("id" = i32, Path, description = "Cinema hall ID")),
    responses(
        (status = 200, description = "Cinema hall found", body = CinemaHallResponse),
        (status = 404, description = "Cinema hall not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Cinema halls"
)]
pub async fn get_cinema_hall(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CinemaHallResponse>, ApiError> {
    Ok(Json(CinemaHallService::retrieve(&state.db, id).await?.into()))
}

/// Create a cinema hall
#[utoipa::path(
    post,
    path = "/cinema-halls",
    request_body = CinemaHallRequest,
    responses(
        (status = 201, description = "Cinema hall created", body = CinemaHallResponse),
        (status = 400, description = "Blank name or non-positive dimensions", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Cinema halls"
)]
pub async fn create_cinema_hall(
    State(state): State<AppState>,
    Json(request): Json<CinemaHallRequest>,
) -> Result<(StatusCode, Json<CinemaHallResponse>), ApiError> {
    let hall = CinemaHallService::create(&state.db, request.into()).await?;
    Ok((StatusCode::CREATED, Json(hall.into())))
}

/// Replace a cinema hall
#[utoipa::path(
    put,
    path = "/cinema-halls/{id}",
    params(("id" = i32, Path, description = "Cinema hall ID")),
    request_body = CinemaHallRequest,
    responses(
        (status = 200, description = "Cinema hall updated", body = CinemaHallResponse),
        (status = 400, description = "Blank name or non-positive dimensions", body = ErrorResponse),
        (status = 404, description = "Cinema hall not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Cinema halls"
)]
pub async fn update_cinema_hall(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<CinemaHallRequest>,
) -> Result<Json<CinemaHallResponse>, ApiError> {
    let hall = CinemaHallService::update(&state.db, id, request.into()).await?;
    Ok(Json(hall.into()))
}

/// Delete a cinema hall together with its sessions and their tickets
#[utoipa::path(
    delete,
    path = "/cinema-halls/{id}",
    params(("id" = i32, Path, description = "Cinema hall ID")),
    responses(
        (status = 204, description = "Cinema hall deleted"),
        (status = 404, description = "Cinema hall not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Cinema halls"
)]
pub async fn delete_cinema_hall(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    CinemaHallService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
