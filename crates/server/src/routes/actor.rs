use crate::{
    dtos::catalog::{ActorRequest, ActorResponse},
    error::{ApiError, ErrorResponse},
    routes::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::actor::ActorService;

/// List all actors
#[utoipa::path(
    get,
    path = "/actors",
    responses(
        (status = 200, description = "Actors ordered by id", body = Vec<ActorResponse>),
        (status = 401, description = "Unauthorized - invalid or missing JWT")
    ),
    security(("jwt" = [])),
    tag = "Actors"
)]
pub async fn list_actors(
    State(state): State<AppState>,
) -> Result<Json<Vec<ActorResponse>>, ApiError> {
    let actors = ActorService::list(&state.db).await?;
    Ok(Json(actors.into_iter().map(ActorResponse::from).collect()))
}

/// Get an actor by ID
#[utoipa::path(
    get,
    path = "/actors/{id}",
    params(("id" = i32, Path, description = "Actor ID")),
    responses(
        (status = 200, description = "Actor found", body = ActorResponse),
        (status = 404, description = "Actor not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Actors"
)]
pub async fn get_actor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ActorResponse>, ApiError> {
    Ok(Json(ActorService::retrieve(&state.db, id).await?.into()))
}

/// Create an actor
#[utoipa::path(
    post,
    path = "/actors",
    request_body = ActorRequest,
    responses(
        (status = 201, description = "Actor created", body = ActorResponse),
        (status = 400, description = "Blank name", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Actors"
)]
pub async fn create_actor(
    State(state): State<AppState>,
    Json(request): Json<ActorRequest>,
) -> Result<(StatusCode, Json<ActorResponse>), ApiError> {
    let actor = ActorService::create(&state.db, request.into()).await?;
    Ok((StatusCode::CREATED, Json(actor.into())))
}

#[utoipa::path(
    put,
    path = "/actors/{id}",
    params(("id" = i32, Path, description = "Actor ID")),
    request_body = ActorRequest,
    responses(
        (status = 200, description = "Actor updated", body = ActorResponse),
        (status = 400, description = "Blank name", body = ErrorResponse),
        (status = 404, description = "Actor not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Actors"
)]
pub async fn update_actor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<ActorRequest>,
) -> Result<Json<ActorResponse>, ApiError> {
    let actor = ActorService::update(&state.db, id, request.into()).await?;
    Ok(Json(actor.into()))
}

#[utoipa::path(
    delete,
    path = "/actors/{id}",
    params(("id" = i32, Path, description = "Actor ID")),
    responses(
        (status = 204, description = "Actor deleted"),
        (status = 404, description = "Actor not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Actors"
)]
pub async fn delete_actor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    ActorService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
