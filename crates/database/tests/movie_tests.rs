mod common;

use database::services::{ServiceError, movie::MovieService};
use models::{catalog::MovieInput, filters::MovieFilter};
use std::collections::{BTreeSet, HashSet};

#[tokio::test]
async fn test_actor_filter_matches_any_id_without_duplicates() {
    let db = common::setup().await;
    let keanu = common::actor(&db, "Keanu Reeves").await.id;
    let carrie = common::actor(&db, "Carrie-Anne Moss").await.id;
    let hugo = common::actor(&db, "Hugo Weaving").await.id;

    // Both requested actors star in the first movie
    common::movie(&db, "The Matrix", &[], &[keanu, carrie]).await;
    common::movie(&db, "John Wick", &[], &[keanu]).await;
    common::movie(&db, "V for Vendetta", &[], &[hugo]).await;

    let filter = MovieFilter::parse(Some(&format!("{keanu},{carrie}")), None, None).unwrap();
    let movies = MovieService::list(&db, &filter).await.unwrap();

    let titles: Vec<_> = movies.iter().map(|m| m.movie.title.as_str()).collect();
    assert_eq!(titles, vec!["The Matrix", "John Wick"]);

    let ids: HashSet<_> = movies.iter().map(|m| m.movie.id).collect();
    assert_eq!(ids.len(), movies.len());

    for movie in &movies {
        assert!(
            movie
                .actors
                .iter()
                .any(|a| a.id == keanu || a.id == carrie)
        );
    }
}

#[tokio::test]
async fn test_title_filter_is_case_insensitive() {
    let db = common::setup().await;
    common::movie(&db, "The Matrix", &[], &[]).await;
    common::movie(&db, "THE MATRIX RELOADED", &[], &[]).await;
    common::movie(&db, "Inception", &[], &[]).await;

    let filter = MovieFilter::parse(None, None, Some("matrix")).unwrap();
    let movies = MovieService::list(&db, &filter).await.unwrap();

    assert_eq!(movies.len(), 2);
    for movie in &movies {
        assert!(movie.movie.title.to_lowercase().contains("matrix"));
    }

    // LIKE wildcards in the input are taken literally
    let filter = MovieFilter::parse(None, None, Some("%")).unwrap();
    assert!(MovieService::list(&db, &filter).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_filters_combine_conjunctively() {
    let db = common::setup().await;
    let action = common::genre(&db, "Action").await.id;
    let drama = common::genre(&db, "Drama").await.id;
    let keanu = common::actor(&db, "Keanu Reeves").await.id;

    common::movie(&db, "The Matrix", &[action], &[keanu]).await;
    common::movie(&db, "Sweet November", &[drama], &[keanu]).await;
    common::movie(&db, "Gladiator", &[action, drama], &[]).await;

    let filter = MovieFilter::parse(
        Some(&keanu.to_string()),
        Some(&format!("{action},{drama}")),
        Some("mat"),
    )
    .unwrap();
    let movies = MovieService::list(&db, &filter).await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].movie.title, "The Matrix");

    let filter = MovieFilter::parse(None, Some(&drama.to_string()), None).unwrap();
    let titles: Vec<_> = MovieService::list(&db, &filter)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.movie.title)
        .collect();
    assert_eq!(titles, vec!["Sweet November", "Gladiator"]);
}

#[tokio::test]
async fn test_retrieve_loads_relations() {
    let db = common::setup().await;
    let action = common::genre(&db, "Action").await;
    let keanu = common::actor(&db, "Keanu Reeves").await;
    let id = common::movie(&db, "The Matrix", &[action.id], &[keanu.id]).await;

    let movie = MovieService::retrieve(&db, id).await.unwrap();
    assert_eq!(movie.genres, vec![action]);
    assert_eq!(movie.actors, vec![keanu]);

    assert!(matches!(
        MovieService::retrieve(&db, id + 1).await,
        Err(ServiceError::NotFound { entity: "movie", .. })
    ));
}

#[tokio::test]
async fn test_unknown_links_are_rejected_atomically() {
    let db = common::setup().await;
    let action = common::genre(&db, "Action").await.id;

    let result = MovieService::create(
        &db,
        MovieInput {
            title: "The Matrix".to_string(),
            description: String::new(),
            duration: 136,
            genres: BTreeSet::from([action]),
            actors: BTreeSet::from([99]),
        },
    )
    .await;
    assert!(matches!(result, Err(ServiceError::Validation(e)) if e.field == "actors"));

    let all = MovieService::list(&db, &MovieFilter::default())
        .await
        .unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_update_replaces_links() {
    let db = common::setup().await;
    let action = common::genre(&db, "Action").await.id;
    let scifi = common::genre(&db, "Sci-Fi").await.id;
    let keanu = common::actor(&db, "Keanu Reeves").await.id;
    let id = common::movie(&db, "The Matrix", &[action], &[keanu]).await;

    let updated = MovieService::update(
        &db,
        id,
        MovieInput {
            title: "The Matrix".to_string(),
            description: "Neo wakes up".to_string(),
            duration: 136,
            genres: BTreeSet::from([scifi]),
            actors: BTreeSet::new(),
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.movie.duration, 136);
    assert_eq!(
        updated.genres.iter().map(|g| g.id).collect::<Vec<_>>(),
        vec![scifi]
    );
    assert!(updated.actors.is_empty());

    MovieService::delete(&db, id).await.unwrap();
    assert!(matches!(
        MovieService::delete(&db, id).await,
        Err(ServiceError::NotFound { .. })
    ));
}
