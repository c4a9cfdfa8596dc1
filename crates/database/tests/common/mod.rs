#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use database::{
    entities::{actor, cinema_hall, genre, movie_session},
    services::{
        actor::ActorService, cinema_hall::CinemaHallService, genre::GenreService,
        movie::MovieService, movie_session::MovieSessionService,
    },
};
use migration::{Migrator, MigratorTrait};
use models::catalog::{ActorInput, CinemaHallInput, GenreInput, MovieInput, MovieSessionInput};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::collections::BTreeSet;

/// Fresh in-memory database with every migration applied
pub async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub fn at(date: (i32, u32, u32), hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(date.0, date.1, date.2)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub async fn genre(db: &DatabaseConnection, name: &str) -> genre::Model {
    GenreService::create(
        db,
        GenreInput {
            name: name.to_string(),
        },
    )
    .await
    .unwrap()
}

pub async fn actor(db: &DatabaseConnection, name: &str) -> actor::Model {
    ActorService::create(
        db,
        ActorInput {
            name: name.to_string(),
        },
    )
    .await
    .unwrap()
}

pub async fn hall(db: &DatabaseConnection, rows: i32, seats_in_row: i32) -> cinema_hall::Model {
    CinemaHallService::create(
        db,
        CinemaHallInput {
            name: format!("Hall {rows}x{seats_in_row}"),
            rows,
            seats_in_row,
        },
    )
    .await
    .unwrap()
}

pub async fn movie(db: &DatabaseConnection, title: &str, genres: &[i32], actors: &[i32]) -> i32 {
    MovieService::create(
        db,
        MovieInput {
            title: title.to_string(),
            description: format!("About {title}"),
            duration: 120,
            genres: genres.iter().copied().collect::<BTreeSet<_>>(),
            actors: actors.iter().copied().collect::<BTreeSet<_>>(),
        },
    )
    .await
    .unwrap()
    .movie
    .id
}

pub async fn session(
    db: &DatabaseConnection,
    movie: i32,
    cinema_hall: i32,
    show_time: NaiveDateTime,
) -> movie_session::Model {
    MovieSessionService::create(
        db,
        MovieSessionInput {
            show_time,
            movie,
            cinema_hall,
        },
    )
    .await
    .unwrap()
}
