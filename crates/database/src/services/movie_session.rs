use super::{
    ServiceError, ServiceResult,
    movie::{MovieService, MovieWithRelations},
};
use crate::entities::{cinema_hall, movie, movie_session, ticket};
use chrono::NaiveDateTime;
use log::{debug, info};
use models::{
    ValidationError,
    catalog::{HallLayout, MovieSessionInput},
    filters::SessionFilter,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, EntityTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, QueryTrait, RelationTrait, Select,
    sea_query::{Expr, ExprTrait, Func, SimpleExpr},
};

/// A session as shown in the list view, annotated with its free seats
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct MovieSessionListRow {
    pub id: i32,
    pub show_time: NaiveDateTime,
    pub movie_id: i32,
    pub cinema_hall_id: i32,
    pub movie_title: String,
    pub cinema_hall_name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub tickets_available: i64,
}

impl MovieSessionListRow {
    pub fn layout(&self) -> HallLayout {
        HallLayout {
            rows: self.rows,
            seats_in_row: self.seats_in_row,
        }
    }
}

/// A single session with everything needed to pick a seat
#[derive(Debug, Clone, PartialEq)]
pub struct MovieSessionDetail {
    pub session: movie_session::Model,
    pub movie: MovieWithRelations,
    pub cinema_hall: cinema_hall::Model,
    /// Sold tickets ordered by row, then seat
    pub taken: Vec<ticket::Model>,
}

/// Maps a session filter onto a query condition
pub fn session_condition(filter: &SessionFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(movie_id) = filter.movie {
        condition = condition.add(movie_session::Column::MovieId.eq(movie_id));
    }

    // Date-only match, whatever the time of day
    if let Some((start, end)) = filter.show_time_range() {
        condition = condition
            .add(movie_session::Column::ShowTime.gte(start))
            .add(movie_session::Column::ShowTime.lt(end));
    }

    condition
}

/// `rows * seats_in_row - COUNT(tickets.id)`, evaluated by the store
fn tickets_available() -> SimpleExpr {
    Expr::col((cinema_hall::Entity, cinema_hall::Column::Rows))
        .mul(Expr::col((cinema_hall::Entity, cinema_hall::Column::SeatsInRow)))
        .sub(Func::count(Expr::col((ticket::Entity, ticket::Column::Id))))
}

/// The annotated list query: one row per session, ordered by id
pub fn list_query(filter: &SessionFilter) -> Select<movie_session::Entity> {
    movie_session::Entity::find()
        .select_only()
        .column(movie_session::Column::Id)
        .column(movie_session::Column::ShowTime)
        .column(movie_session::Column::MovieId)
        .column(movie_session::Column::CinemaHallId)
        .column_as(movie::Column::Title, "movie_title")
        .column_as(cinema_hall::Column::Name, "cinema_hall_name")
        .column_as(cinema_hall::Column::Rows, "rows")
        .column_as(cinema_hall::Column::SeatsInRow, "seats_in_row")
        .expr_as(tickets_available(), "tickets_available")
        .join(JoinType::InnerJoin, movie_session::Relation::Movie.def())
        .join(JoinType::InnerJoin, movie_session::Relation::CinemaHall.def())
        .join(JoinType::LeftJoin, movie_session::Relation::Tickets.def())
        .filter(session_condition(filter))
        .group_by(movie_session::Column::Id)
        .group_by(movie_session::Column::ShowTime)
        .group_by(movie_session::Column::MovieId)
        .group_by(movie_session::Column::CinemaHallId)
        .group_by(movie::Column::Title)
        .group_by(cinema_hall::Column::Name)
        .group_by(cinema_hall::Column::Rows)
        .group_by(cinema_hall::Column::SeatsInRow)
        .order_by_asc(movie_session::Column::Id)
}

pub struct MovieSessionService;

impl MovieSessionService {
    pub async fn list(
        db: &DatabaseConnection,
        filter: &SessionFilter,
    ) -> ServiceResult<Vec<MovieSessionListRow>> {
        let query = list_query(filter);

        debug!(
            "Movie session list SQL: {}",
            query.build(db.get_database_backend())
        );

        Ok(query.into_model::<MovieSessionListRow>().all(db).await?)
    }

    pub async fn retrieve(db: &DatabaseConnection, id: i32) -> ServiceResult<MovieSessionDetail> {
        let (session, cinema_hall) = movie_session::Entity::find_by_id(id)
            .find_also_related(cinema_hall::Entity)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("movie session", id))?;
        let cinema_hall = cinema_hall.ok_or(ServiceError::not_found(
            "cinema hall",
            session.cinema_hall_id,
        ))?;

        let movie = MovieService::find_with_relations(db, session.movie_id).await?;

        let taken = ticket::Entity::find()
            .filter(ticket::Column::MovieSessionId.eq(id))
            .order_by_asc(ticket::Column::Row)
            .order_by_asc(ticket::Column::Seat)
            .all(db)
            .await?;

        Ok(MovieSessionDetail {
            session,
            movie,
            cinema_hall,
            taken,
        })
    }

    pub async fn create(
        db: &DatabaseConnection,
        input: MovieSessionInput,
    ) -> ServiceResult<movie_session::Model> {
        Self::check_references(db, &input).await?;

        let session = movie_session::ActiveModel {
            show_time: Set(input.show_time),
            movie_id: Set(input.movie),
            cinema_hall_id: Set(input.cinema_hall),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(
            "Created movie session {} (movie {}, hall {}, {})",
            session.id, session.movie_id, session.cinema_hall_id, session.show_time
        );
        Ok(session)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        input: MovieSessionInput,
    ) -> ServiceResult<movie_session::Model> {
        let existing = movie_session::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("movie session", id))?;
        Self::check_references(db, &input).await?;

        let mut session: movie_session::ActiveModel = existing.into();
        session.show_time = Set(input.show_time);
        session.movie_id = Set(input.movie);
        session.cinema_hall_id = Set(input.cinema_hall);

        Ok(session.update(db).await?)
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> ServiceResult<()> {
        let result = movie_session::Entity::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("movie session", id));
        }

        info!("Deleted movie session {id}");
        Ok(())
    }

    async fn check_references<C: ConnectionTrait>(
        db: &C,
        input: &MovieSessionInput,
    ) -> ServiceResult<()> {
        let movies = movie::Entity::find_by_id(input.movie).count(db).await?;
        if movies == 0 {
            return Err(
                ValidationError::new("movie", format!("no movie with id {}", input.movie)).into(),
            );
        }

        let halls = cinema_hall::Entity::find_by_id(input.cinema_hall)
            .count(db)
            .await?;
        if halls == 0 {
            return Err(ValidationError::new(
                "cinema_hall",
                format!("no cinema hall with id {}", input.cinema_hall),
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sea_orm::DbBackend;

    fn render(filter: &SessionFilter) -> String {
        list_query(filter).build(DbBackend::Postgres).to_string()
    }

    #[test]
    fn test_availability_is_computed_by_the_store() {
        let sql = render(&SessionFilter::default());

        assert!(sql.contains(r#""cinema_halls"."rows" * "cinema_halls"."seats_in_row""#));
        assert!(sql.contains(r#"COUNT("tickets"."id") AS "tickets_available""#));
        assert!(sql.contains(r#"LEFT JOIN "tickets""#));
        assert!(sql.contains("GROUP BY"));
        assert!(sql.ends_with(r#"ORDER BY "movie_sessions"."id" ASC"#));
    }

    #[test]
    fn test_date_filter_is_a_half_open_range() {
        let filter = SessionFilter {
            movie: Some(7),
            date: NaiveDate::from_ymd_opt(2024, 3, 15),
        };
        let sql = render(&filter);

        assert!(sql.contains(r#""movie_sessions"."movie_id" = 7"#));
        assert!(sql.contains(r#""movie_sessions"."show_time" >= '2024-03-15 00:00:00'"#));
        assert!(sql.contains(r#""movie_sessions"."show_time" < '2024-03-16 00:00:00'"#));
    }
}
