use super::{ServiceError, ServiceResult};
use crate::entities::cinema_hall;
use log::info;
use models::catalog::CinemaHallInput;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder,
};

pub struct CinemaHallService;

impl CinemaHallService {
    pub async fn list(db: &DatabaseConnection) -> ServiceResult<Vec<cinema_hall::Model>> {
        Ok(cinema_hall::Entity::find()
            .order_by_asc(cinema_hall::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn retrieve(db: &DatabaseConnection, id: i32) -> ServiceResult<cinema_hall::Model> {
        cinema_hall::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("cinema hall", id))
    }

    pub async fn create(
        db: &DatabaseConnection,
        input: CinemaHallInput,
    ) -> ServiceResult<cinema_hall::Model> {
        input.validate()?;

        let hall = cinema_hall::ActiveModel {
            name: Set(input.name),
            rows: Set(input.rows),
            seats_in_row: Set(input.seats_in_row),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(
            "Created cinema hall {} ({} seats)",
            hall.id,
            hall.layout().capacity()
        );
        Ok(hall)
    }

    /// Shrinking a hall does not touch tickets already sold outside the new grid
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        input: CinemaHallInput,
    ) -> ServiceResult<cinema_hall::Model> {
        input.validate()?;

        let mut hall: cinema_hall::ActiveModel = Self::retrieve(db, id).await?.into();
        hall.name = Set(input.name);
        hall.rows = Set(input.rows);
        hall.seats_in_row = Set(input.seats_in_row);

        Ok(hall.update(db).await?)
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> ServiceResult<()> {
        let result = cinema_hall::Entity::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("cinema hall", id));
        }

        info!("Deleted cinema hall {id}");
        Ok(())
    }
}
