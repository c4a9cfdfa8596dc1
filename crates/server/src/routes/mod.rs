pub mod actor;
pub mod auth;
pub mod cinema_hall;
pub mod genre;
pub mod health;
pub mod movie;
pub mod movie_session;
pub mod order;

use axum::{Router, routing::get};
use sea_orm::DatabaseConnection;

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

/// Endpoints that need no token
pub fn public_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .with_state(state)
}

/// Resource endpoints. The caller wraps them in the OAuth2 layer.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/me", get(auth::me))
        .route("/genres", get(genre::list_genres).post(genre::create_genre))
        .route(
            "/genres/{id}",
            get(genre::get_genre)
                .put(genre::update_genre)
                .delete(genre::delete_genre),
        )
        .route("/actors", get(actor::list_actors).post(actor::create_actor))
        .route(
            "/actors/{id}",
            get(actor::get_actor)
                .put(actor::update_actor)
                .delete(actor::delete_actor),
        )
        .route(
            "/cinema-halls",
            get(cinema_hall::list_cinema_halls).post(cinema_hall::create_cinema_hall),
        )
        .route(
            "/cinema-halls/{id}",
            get(cinema_hall::get_cinema_hall)
                .put(cinema_hall::update_cinema_hall)
                .delete(cinema_hall::delete_cinema_hall),
        )
        .route("/movies", get(movie::list_movies).post(movie::create_movie))
        .route(
            "/movies/{id}",
            get(movie::get_movie)
                .put(movie::update_movie)
                .delete(movie::delete_movie),
        )
        .route(
            "/movie-sessions",
            get(movie_session::list_movie_sessions).post(movie_session::create_movie_session),
        )
        .route(
            "/movie-sessions/{id}",
            get(movie_session::get_movie_session)
                .put(movie_session::update_movie_session)
                .delete(movie_session::delete_movie_session),
        )
        .route("/orders", get(order::list_orders).post(order::create_order))
        .route(
            "/orders/{id}",
            get(order::get_order)
                .put(order::update_order)
                .delete(order::delete_order),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn app() -> Router {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).sqlx_logging(false);

        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let state = AppState { db };
        public_router(state.clone()).merge(api_router(state))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = app().await;
        for uri in ["/", "/health"] {
            let response = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn test_genre_lifecycle() {
        let app = app().await;

        let (status, body) = send(&app, post("/genres", json!({ "name": "Drama" }))).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["id"].as_i64().unwrap();

        let (status, body) = send(&app, get(&format!("/genres/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Drama");

        let (status, body) = send(&app, post("/genres", json!({ "name": "Drama" }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "conflict");

        let (status, body) = send(&app, get("/genres/999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_cinema_hall_reports_capacity() {
        let app = app().await;

        let (status, body) = send(
            &app,
            post(
                "/cinema-halls",
                json!({ "name": "Blue", "rows": 10, "seats_in_row": 15 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["capacity"], 150);

        let (status, body) = send(
            &app,
            post(
                "/cinema-halls",
                json!({ "name": "Empty", "rows": 0, "seats_in_row": 15 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_movie_representations() {
        let app = app().await;

        let (_, genre) = send(&app, post("/genres", json!({ "name": "Sci-Fi" }))).await;
        let (_, actor) = send(&app, post("/actors", json!({ "name": "Keanu Reeves" }))).await;

        let (status, created) = send(
            &app,
            post(
                "/movies",
                json!({
                    "title": "The Matrix",
                    "description": "Red pill",
                    "duration": 136,
                    "genres": [genre["id"]],
                    "actors": [actor["id"]],
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["genres"], json!([genre["id"]]));

        let (status, list) = send(&app, get("/movies?title=matrix")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list[0]["actors"], json!(["Keanu Reeves"]));

        let (_, detail) = send(&app, get(&format!("/movies/{}", created["id"]))).await;
        assert_eq!(detail["genres"][0]["name"], "Sci-Fi");
    }

    #[tokio::test]
    async fn test_malformed_filters_are_rejected() {
        let app = app().await;

        let (status, body) = send(&app, get("/movies?actors=1,abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");

        let (status, _) = send(&app, get("/movie-sessions?date=15-03-2024")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, get("/movie-sessions?date=2024-03-15")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_orders_require_identity() {
        let app = app().await;

        let (status, body) = send(&app, get("/orders")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthorized");

        let (status, _) = send(
            &app,
            post(
                "/orders",
                json!({ "tickets": [{ "movie_session": 1, "row": 1, "seat": 1 }] }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, get("/me")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
