use chrono::NaiveDateTime;
use database::services::order::{OrderWithTickets, TicketWithSession};
use models::{
    order::{NewTicket, OrderInput},
    pagination::PageInfo,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// The session a ticket was sold for, without availability
#[derive(Debug, Serialize, ToSchema)]
pub struct TicketSessionResponse {
    pub id: i32,
    pub show_time: NaiveDateTime,
    pub movie_title: String,
    pub cinema_hall_name: String,
    pub cinema_hall_capacity: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TicketResponse {
    pub id: i32,
    pub row: i32,
    pub seat: i32,
    pub movie_session: TicketSessionResponse,
}

impl From<TicketWithSession> for TicketResponse {
    fn from(data: TicketWithSession) -> Self {
        Self {
            id: data.ticket.id,
            row: data.ticket.row,
            seat: data.ticket.seat,
            movie_session: TicketSessionResponse {
                id: data.session.id,
                show_time: data.session.show_time,
                movie_title: data.movie.title,
                cinema_hall_capacity: data.cinema_hall.layout().capacity(),
                cinema_hall_name: data.cinema_hall.name,
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub created_at: NaiveDateTime,
    pub tickets: Vec<TicketResponse>,
}

impl From<OrderWithTickets> for OrderResponse {
    fn from(data: OrderWithTickets) -> Self {
        Self {
            id: data.order.id,
            created_at: data.order.created_at,
            tickets: data.tickets.into_iter().map(TicketResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedOrdersResponse {
    pub orders: Vec<OrderResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl From<PageInfo> for PaginationMeta {
    fn from(info: PageInfo) -> Self {
        Self {
            page: info.page,
            page_size: info.page_size,
            total_pages: info.total_pages,
            total_items: info.total_items,
            has_next: info.has_next(),
            has_prev: info.has_prev(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TicketRequest {
    pub movie_session: i32,
    pub row: i32,
    pub seat: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderRequest {
    pub tickets: Vec<TicketRequest>,
}

impl From<OrderRequest> for OrderInput {
    fn from(request: OrderRequest) -> Self {
        Self {
            tickets: request
                .tickets
                .into_iter()
                .map(|t| NewTicket {
                    movie_session: t.movie_session,
                    row: t.row,
                    seat: t.seat,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct OrderQueryParams {
    /// 1-based page number, defaults to 1
    pub page: Option<i64>,
    /// Orders per page, defaults to 1 and is capped at 10
    pub page_size: Option<i64>,
}
