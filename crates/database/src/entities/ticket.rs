use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One sold seat. `(movie_session_id, row, seat)` is unique.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub movie_session_id: i32,
    pub order_id: i32,
    pub row: i32,
    pub seat: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::movie_session::Entity",
        from = "Column::MovieSessionId",
        to = "super::movie_session::Column::Id",
        on_delete = "Cascade"
    )]
    MovieSession,
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id",
        on_delete = "Cascade"
    )]
    Order,
}

impl Related<super::movie_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieSession.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
