use crate::{
    dtos::{
        catalog::{
            ActorRequest, ActorResponse, CinemaHallRequest, CinemaHallResponse, GenreRequest,
            GenreResponse,
        },
        movie::{MovieBody, MovieCanonical, MovieDetail, MovieRequest, MovieSummary},
        movie_session::{
            MovieSessionCanonical, MovieSessionDetailResponse, MovieSessionRequest,
            MovieSessionSummary, TakenPlace,
        },
        order::{
            OrderRequest, OrderResponse, PaginatedOrdersResponse, PaginationMeta, TicketRequest,
            TicketResponse, TicketSessionResponse,
        },
    },
    error::ErrorResponse,
    routes::{actor, auth, cinema_hall, genre, health, movie, movie_session, order},
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::health,
        auth::me,
        genre::list_genres,
        genre::get_genre,
        genre::create_genre,
        genre::update_genre,
        genre::delete_genre,
        actor::list_actors,
        actor::get_actor,
        actor::create_actor,
        actor::update_actor,
        actor::delete_actor,
        cinema_hall::list_cinema_halls,
        cinema_hall::get_cinema_hall,
        cinema_hall::create_cinema_hall,
        cinema_hall::update_cinema_hall,
        cinema_hall::delete_cinema_hall,
        movie::list_movies,
        movie::get_movie,
        movie::create_movie,
        movie::update_movie,
        movie::delete_movie,
        movie_session::list_movie_sessions,
        movie_session::get_movie_session,
        movie_session::create_movie_session,
        movie_session::update_movie_session,
        movie_session::delete_movie_session,
        order::list_orders,
        order::get_order,
        order::create_order,
        order::update_order,
        order::delete_order
    ),
    components(schemas(
        ErrorResponse,
        GenreRequest,
        GenreResponse,
        ActorRequest,
        ActorResponse,
        CinemaHallRequest,
        CinemaHallResponse,
        MovieRequest,
        MovieBody,
        MovieSummary,
        MovieDetail,
        MovieCanonical,
        MovieSessionRequest,
        MovieSessionSummary,
        MovieSessionDetailResponse,
        MovieSessionCanonical,
        TakenPlace,
        OrderRequest,
        TicketRequest,
        OrderResponse,
        TicketResponse,
        TicketSessionResponse,
        PaginatedOrdersResponse,
        PaginationMeta
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Authentication", description = "Authentication related endpoints"),
        (name = "Genres", description = "Movie genres"),
        (name = "Actors", description = "Actors appearing in movies"),
        (name = "Cinema halls", description = "Halls and their seat grids"),
        (name = "Movies", description = "Movie catalog with filtering"),
        (name = "Movie sessions", description = "Scheduled showings and seat availability"),
        (name = "Orders", description = "Ticket orders of the authenticated user"),
    ),
    info(
        title = "Cinema API",
        version = "1.0.0",
        description = "Cinema booking API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_resource() {
        let openapi = ApiDoc::openapi();
        let paths: Vec<&str> = openapi.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/genres",
            "/actors/{id}",
            "/cinema-halls",
            "/movies/{id}",
            "/movie-sessions",
            "/orders/{id}",
        ] {
            assert!(paths.contains(&path), "missing {path}");
        }
        assert!(
            openapi
                .components
                .as_ref()
                .is_some_and(|c| c.security_schemes.contains_key("jwt"))
        );
    }
}
