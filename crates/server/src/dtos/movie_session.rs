use chrono::NaiveDateTime;
use database::{
    entities::movie_session,
    services::movie_session::{MovieSessionDetail, MovieSessionListRow},
};
use models::catalog::MovieSessionInput;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{catalog::CinemaHallResponse, movie::MovieSummary};

/// Session as listed, annotated with its free seats
#[derive(Debug, Serialize, ToSchema)]
pub struct MovieSessionSummary {
    pub id: i32,
    pub show_time: NaiveDateTime,
    pub movie_title: String,
    pub cinema_hall_name: String,
    pub cinema_hall_capacity: i64,
    pub tickets_available: i64,
}

impl From<MovieSessionListRow> for MovieSessionSummary {
    fn from(row: MovieSessionListRow) -> Self {
        Self {
            cinema_hall_capacity: row.layout().capacity(),
            id: row.id,
            show_time: row.show_time,
            movie_title: row.movie_title,
            cinema_hall_name: row.cinema_hall_name,
            tickets_available: row.tickets_available,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TakenPlace {
    pub row: i32,
    pub seat: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MovieSessionDetailResponse {
    pub id: i32,
    pub show_time: NaiveDateTime,
    pub movie: MovieSummary,
    pub cinema_hall: CinemaHallResponse,
    /// Sold seats, ordered by row then seat
    pub taken_places: Vec<TakenPlace>,
}

impl From<MovieSessionDetail> for MovieSessionDetailResponse {
    fn from(detail: MovieSessionDetail) -> Self {
        Self {
            id: detail.session.id,
            show_time: detail.session.show_time,
            movie: detail.movie.into(),
            cinema_hall: detail.cinema_hall.into(),
            taken_places: detail
                .taken
                .into_iter()
                .map(|ticket| TakenPlace {
                    row: ticket.row,
                    seat: ticket.seat,
                })
                .collect(),
        }
    }
}

/// Session as written by clients
#[derive(Debug, Serialize, ToSchema)]
pub struct MovieSessionCanonical {
    pub id: i32,
    pub show_time: NaiveDateTime,
    pub movie: i32,
    pub cinema_hall: i32,
}

impl From<movie_session::Model> for MovieSessionCanonical {
    fn from(session: movie_session::Model) -> Self {
        Self {
            id: session.id,
            show_time: session.show_time,
            movie: session.movie_id,
            cinema_hall: session.cinema_hall_id,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MovieSessionRequest {
    /// Local show time, e.g. `2024-03-15T19:30:00`
    pub show_time: NaiveDateTime,
    pub movie: i32,
    pub cinema_hall: i32,
}

impl From<MovieSessionRequest> for MovieSessionInput {
    fn from(request: MovieSessionRequest) -> Self {
        Self {
            show_time: request.show_time,
            movie: request.movie,
            cinema_hall: request.cinema_hall,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct MovieSessionQueryParams {
    /// Movie id
    pub movie: Option<String>,
    /// Calendar date in `YYYY-MM-DD` format
    pub date: Option<String>,
}
