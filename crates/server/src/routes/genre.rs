use crate::{
    dtos::catalog::{GenreRequest, GenreResponse},
    error::{ApiError, ErrorResponse},
    routes::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::genre::GenreService;

/// List all genres
#[utoipa::path(
    get,
    path = "/genres",
    responses(
        (status = 200, description = "Genres ordered by id", body = Vec<GenreResponse>),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Genres"
)]
pub async fn list_genres(
    State(state): State<AppState>,
) -> Result<Json<Vec<GenreResponse>>, ApiError> {
    let genres = GenreService::list(&state.db).await?;
    Ok(Json(genres.into_iter().map(GenreResponse::from).collect()))
}

/// Get a genre by ID
#[utoipa::path(
    get,
    path = "/genres/{id}",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre found", body = GenreResponse),
        (status = 404, description = "Genre not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Genres"
)]
pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<GenreResponse>, ApiError> {
    Ok(Json(GenreService::retrieve(&state.db, id).await?.into()))
}

/// Create a genre
#[utoipa::path(
    post,
    path = "/genres",
    request_body = GenreRequest,
    responses(
        (status = 201, description = "Genre created", body = GenreResponse),
        (status = 400, description = "Blank name", body = ErrorResponse),
        (status = 409, description = "A genre with this name exists", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Genres"
)]
pub async fn create_genre(
    State(state): State<AppState>,
    Json(request): Json<GenreRequest>,
) -> Result<(StatusCode, Json<GenreResponse>), ApiError> {
    let genre = GenreService::create(&state.db, request.into()).await?;
    Ok((StatusCode::CREATED, Json(genre.into())))
}

/// Replace a genre
#[utoipa::path(
    put,
    path = "/genres/{id}",
    params(("id" = i32, Path, description = "Genre ID")),
    request_body = GenreRequest,
    responses(
        (status = 200, description = "Genre updated", body = GenreResponse),
        (status = 400, description = "Blank name", body = ErrorResponse),
        (status = 404, description = "Genre not found", body = ErrorResponse),
        (status = 409, description = "A genre with this name exists", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Genres"
)]
pub async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<GenreRequest>,
) -> Result<Json<GenreResponse>, ApiError> {
    Ok(Json(GenreService::update(&state.db, id, request.into()).await?.into()))
}

/// Delete a genre
#[utoipa::path(
    delete,
    path = "/genres/{id}",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 404, description = "Genre not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Genres"
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    GenreService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
