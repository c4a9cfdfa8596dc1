use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create orders table, owned by the subject of the token that placed it
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::UserId).string().not_null())
                    .col(ColumnDef::new(Orders::CreatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create tickets table
        manager
            .create_table(
                Table::create()
                    .table(Tickets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tickets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tickets::MovieSessionId).integer().not_null())
                    .col(ColumnDef::new(Tickets::OrderId).integer().not_null())
                    .col(ColumnDef::new(Tickets::Row).integer().not_null())
                    .col(ColumnDef::new(Tickets::Seat).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-tickets-movie_session_id")
                            .from(Tickets::Table, Tickets::MovieSessionId)
                            .to(MovieSessions::Table, MovieSessions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-tickets-order_id")
                            .from(Tickets::Table, Tickets::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tickets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Orders {
    Table,
    Id,
    UserId,
    CreatedAt,
}

#[derive(Iden)]
enum Tickets {
    Table,
    Id,
    MovieSessionId,
    OrderId,
    Row,
    Seat,
}

#[derive(Iden)]
enum MovieSessions {
    Table,
    Id,
}
