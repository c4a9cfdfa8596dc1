use crate::{
    dtos::movie::{MovieBody, MovieQueryParams, MovieRequest},
    error::{ApiError, ErrorResponse},
    routes::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::movie::MovieService;
use models::{filters::MovieFilter, representation::Operation};

/// List movies, optionally filtered by actors, genres and title
#[utoipa::path(
    get,
    path = "/movies",
    params(MovieQueryParams),
    responses(
        (status = 200, description = "Matching movies in summary form", body = Vec<MovieBody>),
        (status = 400, description = "Malformed id list", body = ErrorResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT")
    ),
    security(("jwt" = [])),
    tag = "Movies"
)]
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<MovieQueryParams>,
) -> Result<Json<Vec<MovieBody>>, ApiError> {
    let filter = MovieFilter::parse(
        params.actors.as_deref(),
        params.genres.as_deref(),
        params.title.as_deref(),
    )?;

    let movies = MovieService::list(&state.db, &filter).await?;
    let representation = Operation::List.representation();

    Ok(Json(
        movies
            .into_iter()
            .map(|movie| MovieBody::render(representation, movie))
            .collect(),
    ))
}

/// Get a movie with its genres and actors
#[utoipa::path(
    get,
    path = "/movies/{id}",
    params(("id" = i32, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie found", body = MovieBody),
        (status = 404, description = "Movie not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Movies"
)]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MovieBody>, ApiError> {
    let movie = MovieService::retrieve(&state.db, id).await?;
    Ok(Json(MovieBody::render(
        Operation::Retrieve.representation(),
        movie,
    )))
}

/// Create a movie
#[utoipa::path(
    post,
    path = "/movies",
    request_body = MovieRequest,
    responses(
        (status = 201, description = "Movie created", body = MovieBody),
        (status = 400, description = "Invalid payload or unknown genre/actor", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Movies"
)]
pub async fn create_movie(
    State(state): State<AppState>,
    Json(request): Json<MovieRequest>,
) -> Result<(StatusCode, Json<MovieBody>), ApiError> {
    let movie = MovieService::create(&state.db, request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(MovieBody::render(Operation::Create.representation(), movie)),
    ))
}

/// Replace a movie, including its genre and actor sets
#[utoipa::path(
    put,
    path = "/movies/{id}",
    params(("id" = i32, Path, description = "Movie ID")),
    request_body = MovieRequest,
    responses(
        (status = 200, description = "Movie updated", body = MovieBody),
        (status = 400, description = "Invalid payload or unknown genre/actor", body = ErrorResponse),
        (status = 404, description = "Movie not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Movies"
)]
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<MovieRequest>,
) -> Result<Json<MovieBody>, ApiError> {
    let movie = MovieService::update(&state.db, id, request.into()).await?;
    Ok(Json(MovieBody::render(
        Operation::Update.representation(),
        movie,
    )))
}

#[utoipa::path(
    delete,
    path = "/movies/{id}",
    params(("id" = i32, Path, description = "Movie ID")),
    responses(
        (status = 204, description = "Movie deleted"),
        (status = 404, description = "Movie not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Movies"
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    MovieService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
