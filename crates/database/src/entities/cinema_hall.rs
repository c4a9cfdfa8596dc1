use models::catalog::HallLayout;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cinema_halls")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
}

impl Model {
    pub fn layout(&self) -> HallLayout {
        HallLayout {
            rows: self.rows,
            seats_in_row: self.seats_in_row,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_session::Entity")]
    MovieSessions,
}

impl Related<super::movie_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieSessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
