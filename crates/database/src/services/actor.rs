use super::{ServiceError, ServiceResult};
use crate::entities::actor;
use log::info;
use models::catalog::ActorInput;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder,
};

pub struct ActorService;

impl ActorService {
    pub async fn list(db: &DatabaseConnection) -> ServiceResult<Vec<actor::Model>> {
        Ok(actor::Entity::find()
            .order_by_asc(actor::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn retrieve(db: &DatabaseConnection, id: i32) -> ServiceResult<actor::Model> {
        actor::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("actor", id))
    }

    pub async fn create(db: &DatabaseConnection, input: ActorInput) -> ServiceResult<actor::Model> {
        input.validate()?;

        let actor = actor::ActiveModel {
            name: Set(input.name),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!("Created actor {} ({})", actor.id, actor.name);
        Ok(actor)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        input: ActorInput,
    ) -> ServiceResult<actor::Model> {
        input.validate()?;

        let mut actor: actor::ActiveModel = Self::retrieve(db, id).await?.into();
        actor.name = Set(input.name);

        Ok(actor.update(db).await?)
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> ServiceResult<()> {
        let result = actor::Entity::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("actor", id));
        }

        info!("Deleted actor {id}");
        Ok(())
    }
}
