use crate::{
    dtos::order::{OrderQueryParams, OrderRequest, OrderResponse, PaginatedOrdersResponse},
    error::{ApiError, ErrorResponse},
    routes::AppState,
    utils::auth::CurrentUser,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::order::OrderService;
use models::pagination::PageRequest;

/// Get a page of the caller's orders, newest first
#[utoipa::path(
    get,
    path = "/orders",
    params(OrderQueryParams),
    responses(
        (status = 200, description = "Orders of the authenticated user", body = PaginatedOrdersResponse),
        (status = 400, description = "Non-positive page or page_size", body = ErrorResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<OrderQueryParams>,
) -> Result<Json<PaginatedOrdersResponse>, ApiError> {
    let page = PageRequest::new(params.page, params.page_size)?;
    let (orders, info) = OrderService::list(&state.db, &user, page).await?;

    Ok(Json(PaginatedOrdersResponse {
        orders: orders.into_iter().map(OrderResponse::from).collect(),
        pagination: info.into(),
    }))
}

/// Get one of the caller's orders
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT", body = ErrorResponse),
        (status = 404, description = "No such order for this user", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<OrderResponse>, ApiError> {
    Ok(Json(OrderService::retrieve(&state.db, &user, id).await?.into()))
}

/// Buy tickets. Either every seat is booked or none is.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = OrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Empty order, unknown session or seat outside the hall", body = ErrorResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT", body = ErrorResponse),
        (status = 409, description = "A requested seat is already taken", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<OrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let order = OrderService::create(&state.db, &user, request.into()).await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

/// Replace the tickets of one of the caller's orders
#[utoipa::path(
    put,
    path = "/orders/{id}",
    params(("id" = i32, Path, description = "Order ID")),
    request_body = OrderRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 400, description = "Empty order, unknown session or seat outside the hall", body = ErrorResponse),
        (status = 404, description = "No such order for this user", body = ErrorResponse),
        (status = 409, description = "A requested seat is already taken", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Orders"
)]
pub async fn update_order(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(request): Json<OrderRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = OrderService::update(&state.db, &user, id, request.into()).await?;
    Ok(Json(order.into()))
}

/// Cancel an order, releasing its seats
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "No such order for this user", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    OrderService::delete(&state.db, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
