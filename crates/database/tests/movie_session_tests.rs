mod common;

use database::services::{
    ServiceError, movie_session::MovieSessionService, order::OrderService,
};
use models::{
    UserContext,
    catalog::MovieSessionInput,
    filters::SessionFilter,
    order::{NewTicket, OrderInput},
};

fn tickets(movie_session: i32, count: usize, seats_in_row: i32) -> Vec<NewTicket> {
    (0..count as i32)
        .map(|n| NewTicket {
            movie_session,
            row: n / seats_in_row + 1,
            seat: n % seats_in_row + 1,
        })
        .collect()
}

#[tokio::test]
async fn test_tickets_available_subtracts_sold_tickets() {
    let db = common::setup().await;
    let hall = common::hall(&db, 10, 15).await;
    let movie = common::movie(&db, "The Matrix", &[], &[]).await;
    let busy = common::session(&db, movie, hall.id, common::at((2024, 3, 15), 18, 0)).await;
    let empty = common::session(&db, movie, hall.id, common::at((2024, 3, 15), 21, 0)).await;

    OrderService::create(
        &db,
        &UserContext::new("alice"),
        OrderInput {
            tickets: tickets(busy.id, 37, hall.seats_in_row),
        },
    )
    .await
    .unwrap();

    let sessions = MovieSessionService::list(&db, &SessionFilter::default())
        .await
        .unwrap();
    assert_eq!(sessions.len(), 2);

    assert_eq!(sessions[0].id, busy.id);
    assert_eq!(sessions[0].tickets_available, 113);
    assert_eq!(sessions[0].layout().capacity(), 150);
    assert_eq!(sessions[0].movie_title, "The Matrix");

    assert_eq!(sessions[1].id, empty.id);
    assert_eq!(sessions[1].tickets_available, 150);
}

#[tokio::test]
async fn test_date_filter_ignores_time_of_day() {
    let db = common::setup().await;
    let hall = common::hall(&db, 5, 5).await;
    let matrix = common::movie(&db, "The Matrix", &[], &[]).await;
    let wick = common::movie(&db, "John Wick", &[], &[]).await;

    let midnight = common::session(&db, matrix, hall.id, common::at((2024, 3, 15), 0, 0)).await;
    let late = common::session(&db, wick, hall.id, common::at((2024, 3, 15), 23, 59)).await;
    common::session(&db, matrix, hall.id, common::at((2024, 3, 14), 23, 59)).await;
    common::session(&db, matrix, hall.id, common::at((2024, 3, 16), 0, 0)).await;

    let filter = SessionFilter::parse(None, Some("2024-03-15")).unwrap();
    let ids: Vec<_> = MovieSessionService::list(&db, &filter)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec![midnight.id, late.id]);

    let filter = SessionFilter::parse(Some(&matrix.to_string()), Some("2024-03-15")).unwrap();
    let sessions = MovieSessionService::list(&db, &filter).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].id, midnight.id);
}

#[tokio::test]
async fn test_retrieve_lists_taken_places() {
    let db = common::setup().await;
    let hall = common::hall(&db, 3, 4).await;
    let keanu = common::actor(&db, "Keanu Reeves").await;
    let movie = common::movie(&db, "The Matrix", &[], &[keanu.id]).await;
    let session = common::session(&db, movie, hall.id, common::at((2024, 3, 15), 18, 0)).await;

    OrderService::create(
        &db,
        &UserContext::new("alice"),
        OrderInput {
            tickets: vec![
                NewTicket {
                    movie_session: session.id,
                    row: 2,
                    seat: 1,
                },
                NewTicket {
                    movie_session: session.id,
                    row: 1,
                    seat: 4,
                },
            ],
        },
    )
    .await
    .unwrap();

    let detail = MovieSessionService::retrieve(&db, session.id).await.unwrap();
    assert_eq!(detail.cinema_hall, hall);
    assert_eq!(detail.movie.actors, vec![keanu]);

    let taken: Vec<_> = detail.taken.iter().map(|t| (t.row, t.seat)).collect();
    assert_eq!(taken, vec![(1, 4), (2, 1)]);
}

#[tokio::test]
async fn test_session_references_must_exist() {
    let db = common::setup().await;
    let hall = common::hall(&db, 3, 4).await;

    let result = MovieSessionService::create(
        &db,
        MovieSessionInput {
            show_time: common::at((2024, 3, 15), 18, 0),
            movie: 7,
            cinema_hall: hall.id,
        },
    )
    .await;
    assert!(matches!(result, Err(ServiceError::Validation(e)) if e.field == "movie"));

    assert!(matches!(
        MovieSessionService::retrieve(&db, 1).await,
        Err(ServiceError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_update_moves_session() {
    let db = common::setup().await;
    let small = common::hall(&db, 3, 4).await;
    let large = common::hall(&db, 10, 10).await;
    let movie = common::movie(&db, "The Matrix", &[], &[]).await;
    let session = common::session(&db, movie, small.id, common::at((2024, 3, 15), 18, 0)).await;

    let moved = MovieSessionService::update(
        &db,
        session.id,
        MovieSessionInput {
            show_time: common::at((2024, 3, 16), 20, 30),
            movie,
            cinema_hall: large.id,
        },
    )
    .await
    .unwrap();
    assert_eq!(moved.cinema_hall_id, large.id);

    let sessions = MovieSessionService::list(&db, &SessionFilter::default())
        .await
        .unwrap();
    assert_eq!(sessions[0].tickets_available, 100);

    MovieSessionService::delete(&db, session.id).await.unwrap();
    assert!(
        MovieSessionService::list(&db, &SessionFilter::default())
            .await
            .unwrap()
            .is_empty()
    );
}
