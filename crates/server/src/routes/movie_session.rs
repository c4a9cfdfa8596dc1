use crate::{
    dtos::movie_session::{
        MovieSessionCanonical, MovieSessionDetailResponse, MovieSessionQueryParams,
        MovieSessionRequest, MovieSessionSummary,
    },
    error::{ApiError, ErrorResponse},
    routes::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::movie_session::MovieSessionService;
use models::filters::SessionFilter;

/// List movie sessions with the number of seats still available
#[utoipa::path(
    get,
    path = "/movie-sessions",
    params(MovieSessionQueryParams),
    responses(
        (status = 200, description = "Matching sessions ordered by id", body = Vec<MovieSessionSummary>),
        (status = 400, description = "Malformed movie id or date", body = ErrorResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT")
    ),
    security(("jwt" = [])),
    tag = "Movie sessions"
)]
pub async fn list_movie_sessions(
    State(state): State<AppState>,
    Query(params): Query<MovieSessionQueryParams>,
) -> Result<Json<Vec<MovieSessionSummary>>, ApiError> {
    let filter = SessionFilter::parse(params.movie.as_deref(), params.date.as_deref())?;
    let sessions = MovieSessionService::list(&state.db, &filter).await?;

    Ok(Json(
        sessions.into_iter().map(MovieSessionSummary::from).collect(),
    ))
}

/// Get a session with its movie, hall and taken seats
#[utoipa::path(
    get,
    path = "/movie-sessions/{id}",
    params(("id" = i32, Path, description = "Movie session ID")),
    responses(
        (status = 200, description = "Movie session found", body = MovieSessionDetailResponse),
        (status = 404, description = "Movie session not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Movie sessions"
)]
pub async fn get_movie_session(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MovieSessionDetailResponse>, ApiError> {
    Ok(Json(MovieSessionService::retrieve(&state.db, id).await?.into()))
}

/// Schedule a movie in a hall
#[utoipa::path(
    post,
    path = "/movie-sessions",
    request_body = MovieSessionRequest,
    responses(
        (status = 201, description = "Movie session created", body = MovieSessionCanonical),
        (status = 400, description = "Unknown movie or cinema hall", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Movie sessions"
)]
pub async fn create_movie_session(
    State(state): State<AppState>,
    Json(request): Json<MovieSessionRequest>,
) -> Result<(StatusCode, Json<MovieSessionCanonical>), ApiError> {
    let session = MovieSessionService::create(&state.db, request.into()).await?;
    Ok((StatusCode::CREATED, Json(session.into())))
}

#[utoipa::path(
    put,
    path = "/movie-sessions/{id}",
    params(("id" = i32, Path, description = "Movie session ID")),
    request_body = MovieSessionRequest,
    responses(
        (status = 200, description = "Movie session updated", body = MovieSessionCanonical),
        (status = 400, description = "Unknown movie or cinema hall", body = ErrorResponse),
        (status = 404, description = "Movie session not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Movie sessions"
)]
pub async fn update_movie_session(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<MovieSessionRequest>,
) -> Result<Json<MovieSessionCanonical>, ApiError> {
    let session = MovieSessionService::update(&state.db, id, request.into()).await?;
    Ok(Json(session.into()))
}

/// Delete a session and the tickets sold for it
#[utoipa::path(
    delete,
    path = "/movie-sessions/{id}",
    params(("id" = i32, Path, description = "Movie session ID")),
    responses(
        (status = 204, description = "Movie session deleted"),
        (status = 404, description = "Movie session not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Movie sessions"
)]
pub async fn delete_movie_session(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    MovieSessionService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
