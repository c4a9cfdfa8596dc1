use database::entities::{actor, cinema_hall, genre};
use models::catalog::{ActorInput, CinemaHallInput, GenreInput};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct GenreResponse {
    pub id: i32,
    pub name: String,
}

impl From<genre::Model> for GenreResponse {
    fn from(genre: genre::Model) -> Self {
        Self {
            id: genre.id,
            name: genre.name,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GenreRequest {
    pub name: String,
}

impl From<GenreRequest> for GenreInput {
    fn from(request: GenreRequest) -> Self {
        Self { name: request.name }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActorResponse {
    pub id: i32,
    pub name: String,
}

impl From<actor::Model> for ActorResponse {
    fn from(actor: actor::Model) -> Self {
        Self {
            id: actor.id,
            name: actor.name,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ActorRequest {
    pub name: String,
}

impl From<ActorRequest> for ActorInput {
    fn from(request: ActorRequest) -> Self {
        Self { name: request.name }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CinemaHallResponse {
    pub id: i32,
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    /// rows * seats_in_row
    pub capacity: i64,
}

impl From<cinema_hall::Model> for CinemaHallResponse {
    fn from(hall: cinema_hall::Model) -> Self {
        Self {
            capacity: hall.layout().capacity(),
            id: hall.id,
            name: hall.name,
            rows: hall.rows,
            seats_in_row: hall.seats_in_row,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CinemaHallRequest {
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
}

impl From<CinemaHallRequest> for CinemaHallInput {
    fn from(request: CinemaHallRequest) -> Self {
        Self {
            name: request.name,
            rows: request.rows,
            seats_in_row: request.seats_in_row,
        }
    }
}
