use super::{ServiceError, ServiceResult};
use crate::entities::genre;
use log::info;
use models::catalog::GenreInput;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder,
};

pub struct GenreService;

impl GenreService {
    pub async fn list(db: &DatabaseConnection) -> ServiceResult<Vec<genre::Model>> {
        Ok(genre::Entity::find()
            .order_by_asc(genre::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn retrieve(db: &DatabaseConnection, id: i32) -> ServiceResult<genre::Model> {
        genre::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("genre", id))
    }

    pub async fn create(db: &DatabaseConnection, input: GenreInput) -> ServiceResult<genre::Model> {
        input.validate()?;

        let name = input.name.clone();
        let genre = genre::ActiveModel {
            name: Set(input.name),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(|e| ServiceError::from_write(e, || format!("genre `{name}` already exists")))?;

        info!("Created genre {} ({})", genre.id, genre.name);
        Ok(genre)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        input: GenreInput,
    ) -> ServiceResult<genre::Model> {
        input.validate()?;

        let mut genre: genre::ActiveModel = Self::retrieve(db, id).await?.into();
        let name = input.name.clone();
        genre.name = Set(input.name);

        genre
            .update(db)
            .await
            .map_err(|e| ServiceError::from_write(e, || format!("genre `{name}` already exists")))
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> ServiceResult<()> {
        let result = genre::Entity::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("genre", id));
        }

        info!("Deleted genre {id}");
        Ok(())
    }
}
