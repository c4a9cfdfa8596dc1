use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create genres table
        manager
            .create_table(
                Table::create()
                    .table(Genres::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Genres::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Genres::Name).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        // Create actors table
        manager
            .create_table(
                Table::create()
                    .table(Actors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Actors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Actors::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Create cinema_halls table
        manager
            .create_table(
                Table::create()
                    .table(CinemaHalls::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CinemaHalls::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CinemaHalls::Name).string().not_null())
                    .col(ColumnDef::new(CinemaHalls::Rows).integer().not_null())
                    .col(ColumnDef::new(CinemaHalls::SeatsInRow).integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Create movies table
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Movies::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Movies::Title).string().not_null())
                    .col(ColumnDef::new(Movies::Description).text().not_null())
                    .col(ColumnDef::new(Movies::Duration).integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Create movie_genres junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(MovieGenres::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MovieGenres::MovieId).integer().not_null())
                    .col(ColumnDef::new(MovieGenres::GenreId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(MovieGenres::MovieId)
                            .col(MovieGenres::GenreId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-movie_genres-movie_id")
                            .from(MovieGenres::Table, MovieGenres::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-movie_genres-genre_id")
                            .from(MovieGenres::Table, MovieGenres::GenreId)
                            .to(Genres::Table, Genres::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create movie_actors junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(MovieActors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MovieActors::MovieId).integer().not_null())
                    .col(ColumnDef::new(MovieActors::ActorId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(MovieActors::MovieId)
                            .col(MovieActors::ActorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-movie_actors-movie_id")
                            .from(MovieActors::Table, MovieActors::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-movie_actors-actor_id")
                            .from(MovieActors::Table, MovieActors::ActorId)
                            .to(Actors::Table, Actors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create movie_sessions table
        manager
            .create_table(
                Table::create()
                    .table(MovieSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MovieSessions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MovieSessions::ShowTime).date_time().not_null())
                    .col(ColumnDef::new(MovieSessions::MovieId).integer().not_null())
                    .col(ColumnDef::new(MovieSessions::CinemaHallId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-movie_sessions-movie_id")
                            .from(MovieSessions::Table, MovieSessions::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-movie_sessions-cinema_hall_id")
                            .from(MovieSessions::Table, MovieSessions::CinemaHallId)
                            .to(CinemaHalls::Table, CinemaHalls::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MovieSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MovieActors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MovieGenres::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Movies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CinemaHalls::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Actors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Genres::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Genres {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Actors {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum CinemaHalls {
    Table,
    Id,
    Name,
    Rows,
    SeatsInRow,
}

#[derive(Iden)]
enum Movies {
    Table,
    Id,
    Title,
    Description,
    Duration,
}

#[derive(Iden)]
enum MovieGenres {
    Table,
    MovieId,
    GenreId,
}

#[derive(Iden)]
enum MovieActors {
    Table,
    MovieId,
    ActorId,
}

#[derive(Iden)]
enum MovieSessions {
    Table,
    Id,
    ShowTime,
    MovieId,
    CinemaHallId,
}
