use super::{ServiceError, ServiceResult};
use crate::entities::{actor, genre, movie, movie_actor, movie_genre};
use log::{debug, info};
use models::{ValidationError, catalog::MovieInput, filters::MovieFilter};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, TransactionTrait,
    sea_query::{Expr, ExprTrait, Func, LikeExpr, Query},
};
use std::collections::{BTreeSet, HashMap};

/// A movie with its genres and actors loaded
#[derive(Debug, Clone, PartialEq)]
pub struct MovieWithRelations {
    pub movie: movie::Model,
    pub genres: Vec<genre::Model>,
    pub actors: Vec<actor::Model>,
}

/// Maps a movie filter onto a query condition.
///
/// Id sets are matched through `IN (subquery)` on the junction tables, so a
/// movie linked to several of the requested ids still yields a single row.
pub fn movie_condition(filter: &MovieFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(actor_ids) = &filter.actors {
        condition = condition.add(
            movie::Column::Id.in_subquery(
                Query::select()
                    .column(movie_actor::Column::MovieId)
                    .from(movie_actor::Entity)
                    .and_where(movie_actor::Column::ActorId.is_in(actor_ids.iter().copied()))
                    .to_owned(),
            ),
        );
    }

    if let Some(genre_ids) = &filter.genres {
        condition = condition.add(
            movie::Column::Id.in_subquery(
                Query::select()
                    .column(movie_genre::Column::MovieId)
                    .from(movie_genre::Entity)
                    .and_where(movie_genre::Column::GenreId.is_in(genre_ids.iter().copied()))
                    .to_owned(),
            ),
        );
    }

    // Postgres folds case across Unicode like `to_lowercase`; SQLite's LOWER
    // only folds ASCII, so non-ASCII titles match case-sensitively there
    if let Some(title) = &filter.title {
        let pattern = format!("%{}%", escape_like(&title.to_lowercase()));
        condition = condition.add(
            Expr::expr(Func::lower(Expr::col((movie::Entity, movie::Column::Title))))
                .like(LikeExpr::new(pattern).escape('\\')),
        );
    }

    condition
}

/// Escapes the LIKE metacharacters of user input
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub struct MovieService;

impl MovieService {
    /// List movies matching the filter, ordered by id
    pub async fn list(
        db: &DatabaseConnection,
        filter: &MovieFilter,
    ) -> ServiceResult<Vec<MovieWithRelations>> {
        let query = movie::Entity::find()
            .filter(movie_condition(filter))
            .order_by_asc(movie::Column::Id);

        debug!(
            "Movie list SQL: {}",
            query.build(db.get_database_backend())
        );

        let movies = query.all(db).await?;
        Ok(Self::load_relations(db, movies).await?)
    }

    pub async fn retrieve(db: &DatabaseConnection, id: i32) -> ServiceResult<MovieWithRelations> {
        Self::find_with_relations(db, id).await
    }

    pub async fn create(
        db: &DatabaseConnection,
        input: MovieInput,
    ) -> ServiceResult<MovieWithRelations> {
        input.validate()?;

        let txn = db.begin().await?;
        Self::check_links(&txn, &input).await?;

        let movie = movie::ActiveModel {
            title: Set(input.title),
            description: Set(input.description),
            duration: Set(input.duration),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        Self::insert_links(&txn, movie.id, &input.genres, &input.actors).await?;
        txn.commit().await?;

        info!("Created movie {} ({})", movie.id, movie.title);
        Self::find_with_relations(db, movie.id).await
    }

    /// Replaces the movie's fields and its genre and actor sets
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        input: MovieInput,
    ) -> ServiceResult<MovieWithRelations> {
        input.validate()?;

        let txn = db.begin().await?;
        let existing = movie::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::not_found("movie", id))?;
        Self::check_links(&txn, &input).await?;

        let mut movie: movie::ActiveModel = existing.into();
        movie.title = Set(input.title);
        movie.description = Set(input.description);
        movie.duration = Set(input.duration);
        movie.update(&txn).await?;

        movie_genre::Entity::delete_many()
            .filter(movie_genre::Column::MovieId.eq(id))
            .exec(&txn)
            .await?;
        movie_actor::Entity::delete_many()
            .filter(movie_actor::Column::MovieId.eq(id))
            .exec(&txn)
            .await?;
        Self::insert_links(&txn, id, &input.genres, &input.actors).await?;

        txn.commit().await?;
        Self::find_with_relations(db, id).await
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> ServiceResult<()> {
        let result = movie::Entity::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("movie", id));
        }

        info!("Deleted movie {id}");
        Ok(())
    }

    pub(crate) async fn find_with_relations<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> ServiceResult<MovieWithRelations> {
        let movie = movie::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("movie", id))?;

        Self::load_relations(db, vec![movie])
            .await?
            .pop()
            .ok_or(ServiceError::not_found("movie", id))
    }

    /// Batch load genres and actors for a list of movies, keeping their order
    pub(crate) async fn load_relations<C: ConnectionTrait>(
        db: &C,
        movies: Vec<movie::Model>,
    ) -> Result<Vec<MovieWithRelations>, DbErr> {
        if movies.is_empty() {
            return Ok(vec![]);
        }

        let movie_ids: Vec<i32> = movies.iter().map(|m| m.id).collect();

        let genre_links = movie_genre::Entity::find()
            .filter(movie_genre::Column::MovieId.is_in(movie_ids.clone()))
            .find_also_related(genre::Entity)
            .order_by_asc(movie_genre::Column::GenreId)
            .all(db)
            .await?;

        let actor_links = movie_actor::Entity::find()
            .filter(movie_actor::Column::MovieId.is_in(movie_ids))
            .find_also_related(actor::Entity)
            .order_by_asc(movie_actor::Column::ActorId)
            .all(db)
            .await?;

        // Build lookup maps
        let mut genres_by_movie: HashMap<i32, Vec<genre::Model>> = HashMap::new();
        for (link, genre) in genre_links {
            if let Some(genre) = genre {
                genres_by_movie.entry(link.movie_id).or_default().push(genre);
            }
        }

        let mut actors_by_movie: HashMap<i32, Vec<actor::Model>> = HashMap::new();
        for (link, actor) in actor_links {
            if let Some(actor) = actor {
                actors_by_movie.entry(link.movie_id).or_default().push(actor);
            }
        }

        Ok(movies
            .into_iter()
            .map(|movie| MovieWithRelations {
                genres: genres_by_movie.remove(&movie.id).unwrap_or_default(),
                actors: actors_by_movie.remove(&movie.id).unwrap_or_default(),
                movie,
            })
            .collect())
    }

    /// Every referenced genre and actor must exist
    async fn check_links(txn: &DatabaseTransaction, input: &MovieInput) -> ServiceResult<()> {
        if !input.genres.is_empty() {
            let found: BTreeSet<i32> = genre::Entity::find()
                .select_only()
                .column(genre::Column::Id)
                .filter(genre::Column::Id.is_in(input.genres.iter().copied()))
                .into_tuple::<i32>()
                .all(txn)
                .await?
                .into_iter()
                .collect();
            if let Some(missing) = input.genres.difference(&found).next() {
                return Err(
                    ValidationError::new("genres", format!("no genre with id {missing}")).into(),
                );
            }
        }

        if !input.actors.is_empty() {
            let found: BTreeSet<i32> = actor::Entity::find()
                .select_only()
                .column(actor::Column::Id)
                .filter(actor::Column::Id.is_in(input.actors.iter().copied()))
                .into_tuple::<i32>()
                .all(txn)
                .await?
                .into_iter()
                .collect();
            if let Some(missing) = input.actors.difference(&found).next() {
                return Err(
                    ValidationError::new("actors", format!("no actor with id {missing}")).into(),
                );
            }
        }

        Ok(())
    }

    async fn insert_links(
        txn: &DatabaseTransaction,
        movie_id: i32,
        genre_ids: &BTreeSet<i32>,
        actor_ids: &BTreeSet<i32>,
    ) -> Result<(), DbErr> {
        if !genre_ids.is_empty() {
            movie_genre::Entity::insert_many(genre_ids.iter().map(|&genre_id| {
                movie_genre::ActiveModel {
                    movie_id: Set(movie_id),
                    genre_id: Set(genre_id),
                }
            }))
            .exec_without_returning(txn)
            .await?;
        }

        if !actor_ids.is_empty() {
            movie_actor::Entity::insert_many(actor_ids.iter().map(|&actor_id| {
                movie_actor::ActiveModel {
                    movie_id: Set(movie_id),
                    actor_id: Set(actor_id),
                }
            }))
            .exec_without_returning(txn)
            .await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbBackend;

    fn render(filter: &MovieFilter) -> String {
        movie::Entity::find()
            .filter(movie_condition(filter))
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_empty_filter_has_no_where_clause() {
        let sql = render(&MovieFilter::default());
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_actor_filter_uses_subquery() {
        let filter = MovieFilter::parse(Some("2,1"), None, None).unwrap();
        let sql = render(&filter);

        assert!(sql.contains(r#""movies"."id" IN (SELECT "movie_id" FROM "movie_actors""#));
        assert!(sql.contains(r#""actor_id" IN (1, 2)"#));
        assert!(!sql.contains("JOIN"));
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let filter = MovieFilter::parse(Some("1"), Some("3"), Some("Matrix")).unwrap();
        let sql = render(&filter);

        assert!(sql.contains(r#"FROM "movie_actors""#));
        assert!(sql.contains(r#"FROM "movie_genres""#));
        assert!(sql.contains(r#"LOWER("movies"."title") LIKE '%matrix%'"#));
        assert_eq!(sql.matches(" AND ").count(), 2);
    }

    #[test]
    fn test_title_pattern_is_unicode_lowercased() {
        let filter = MovieFilter::parse(None, None, Some("AMÉLIE")).unwrap();
        let sql = render(&filter);

        assert!(sql.contains(r#"LOWER("movies"."title") LIKE '%amélie%'"#));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("100%_off\\"), "100\\%\\_off\\\\");
        assert_eq!(escape_like("matrix"), "matrix");
    }
}
