use database::services::movie::MovieWithRelations;
use models::{catalog::MovieInput, representation::Representation};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::catalog::{ActorResponse, GenreResponse};

/// Movie as listed, with genre and actor names only
#[derive(Debug, Serialize, ToSchema)]
pub struct MovieSummary {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub genres: Vec<String>,
    pub actors: Vec<String>,
}

/// Movie with nested genre and actor objects
#[derive(Debug, Serialize, ToSchema)]
pub struct MovieDetail {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub genres: Vec<GenreResponse>,
    pub actors: Vec<ActorResponse>,
}

/// Movie as written by clients, relations by id
#[derive(Debug, Serialize, ToSchema)]
pub struct MovieCanonical {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub genres: Vec<i32>,
    pub actors: Vec<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum MovieBody {
    Summary(MovieSummary),
    Detail(MovieDetail),
    Canonical(MovieCanonical),
}

impl From<MovieWithRelations> for MovieSummary {
    fn from(data: MovieWithRelations) -> Self {
        Self {
            id: data.movie.id,
            title: data.movie.title,
            description: data.movie.description,
            duration: data.movie.duration,
            genres: data.genres.into_iter().map(|g| g.name).collect(),
            actors: data.actors.into_iter().map(|a| a.name).collect(),
        }
    }
}

impl From<MovieWithRelations> for MovieDetail {
    fn from(data: MovieWithRelations) -> Self {
        Self {
            id: data.movie.id,
            title: data.movie.title,
            description: data.movie.description,
            duration: data.movie.duration,
            genres: data.genres.into_iter().map(GenreResponse::from).collect(),
            actors: data.actors.into_iter().map(ActorResponse::from).collect(),
        }
    }
}

impl From<MovieWithRelations> for MovieCanonical {
    fn from(data: MovieWithRelations) -> Self {
        Self {
            id: data.movie.id,
            title: data.movie.title,
            description: data.movie.description,
            duration: data.movie.duration,
            genres: data.genres.into_iter().map(|g| g.id).collect(),
            actors: data.actors.into_iter().map(|a| a.id).collect(),
        }
    }
}

impl MovieBody {
    pub fn render(representation: Representation, data: MovieWithRelations) -> Self {
        match representation {
            Representation::Summary => Self::Summary(data.into()),
            Representation::Detail => Self::Detail(data.into()),
            Representation::Canonical => Self::Canonical(data.into()),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MovieRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Minutes
    pub duration: i32,
    #[serde(default)]
    pub genres: Vec<i32>,
    #[serde(default)]
    pub actors: Vec<i32>,
}

impl From<MovieRequest> for MovieInput {
    fn from(request: MovieRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            duration: request.duration,
            genres: request.genres.into_iter().collect(),
            actors: request.actors.into_iter().collect(),
        }
    }
}

/// Raw list filters, parsed into a `MovieFilter` by the handler
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct MovieQueryParams {
    /// Comma-separated actor ids, e.g. `1,2`
    pub actors: Option<String>,
    /// Comma-separated genre ids
    pub genres: Option<String>,
    /// Case-insensitive title substring
    pub title: Option<String>,
}
