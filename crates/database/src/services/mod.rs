pub mod actor;
pub mod cinema_hall;
pub mod genre;
pub mod movie;
pub mod movie_session;
pub mod order;

use models::ValidationError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failures surfaced by the services to their callers
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Db(#[from] DbErr),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    /// Turns a unique constraint violation into a conflict, any other store
    /// error passes through
    pub(crate) fn from_write(err: DbErr, conflict: impl FnOnce() -> String) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Conflict(conflict()),
            _ => Self::Db(err),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{cinema_hall, movie, movie_session, order, ticket};
    use chrono::NaiveDate;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ActiveModelTrait, ActiveValue::Set, ConnectOptions, Database};

    #[tokio::test]
    async fn test_from_write_maps_seat_collision_to_conflict() {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let hall = cinema_hall::ActiveModel {
            name: Set("Red".to_string()),
            rows: Set(5),
            seats_in_row: Set(5),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let movie = movie::ActiveModel {
            title: Set("Heat".to_string()),
            description: Set(String::new()),
            duration: Set(170),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let show_time = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap();
        let session = movie_session::ActiveModel {
            show_time: Set(show_time),
            movie_id: Set(movie.id),
            cinema_hall_id: Set(hall.id),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let order = order::ActiveModel {
            user_id: Set("alice".to_string()),
            created_at: Set(show_time),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let seat = || ticket::ActiveModel {
            movie_session_id: Set(session.id),
            order_id: Set(order.id),
            row: Set(2),
            seat: Set(3),
            ..Default::default()
        };
        seat().insert(&db).await.unwrap();
        let err = seat().insert(&db).await.unwrap_err();

        match ServiceError::from_write(err, || "seat taken".to_string()) {
            ServiceError::Conflict(message) => assert_eq!(message, "seat taken"),
            other => panic!("expected a conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_from_write_passes_other_errors_through() {
        let err = ServiceError::from_write(DbErr::Custom("boom".to_string()), || {
            unreachable!("not a constraint violation")
        });
        assert!(matches!(err, ServiceError::Db(DbErr::Custom(_))));
    }
}
