use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // A seat can be sold once per session
        manager
            .create_index(
                Index::create()
                    .name("idx_tickets_session_row_seat")
                    .table(Tickets::Table)
                    .col(Tickets::MovieSessionId)
                    .col(Tickets::Row)
                    .col(Tickets::Seat)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index on tickets.order_id for loading an order's tickets
        manager
            .create_index(
                Index::create()
                    .name("idx_tickets_order_id")
                    .table(Tickets::Table)
                    .col(Tickets::OrderId)
                    .to_owned(),
            )
            .await?;

        // Orders are always listed per user, newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_user_id_created_at")
                    .table(Orders::Table)
                    .col(Orders::UserId)
                    .col(Orders::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Indexes backing the session filters
        manager
            .create_index(
                Index::create()
                    .name("idx_movie_sessions_movie_id")
                    .table(MovieSessions::Table)
                    .col(MovieSessions::MovieId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_sessions_show_time")
                    .table(MovieSessions::Table)
                    .col(MovieSessions::ShowTime)
                    .to_owned(),
            )
            .await?;

        // Reverse lookups for the movie filters
        manager
            .create_index(
                Index::create()
                    .name("idx_movie_genres_genre_id")
                    .table(MovieGenres::Table)
                    .col(MovieGenres::GenreId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_actors_actor_id")
                    .table(MovieActors::Table)
                    .col(MovieActors::ActorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_movie_actors_actor_id",
            "idx_movie_genres_genre_id",
            "idx_movie_sessions_show_time",
            "idx_movie_sessions_movie_id",
            "idx_orders_user_id_created_at",
            "idx_tickets_order_id",
            "idx_tickets_session_row_seat",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(Iden)]
enum Tickets {
    Table,
    MovieSessionId,
    OrderId,
    Row,
    Seat,
}

#[derive(Iden)]
enum Orders {
    Table,
    UserId,
    CreatedAt,
}

#[derive(Iden)]
enum MovieSessions {
    Table,
    MovieId,
    ShowTime,
}

#[derive(Iden)]
enum MovieGenres {
    Table,
    GenreId,
}

#[derive(Iden)]
enum MovieActors {
    Table,
    ActorId,
}
