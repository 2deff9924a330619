use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_movie_title")
                    .table(Movie::Table)
                    .col(Movie::Title)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_edge_node")
                    .table(MovieEdge::Table)
                    .col(MovieEdge::NodeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_movie_edge_node").table(MovieEdge::Table).to_owned())
            .await?;
        manager.drop_index(Index::drop().name("idx_movie_title").table(Movie::Table).to_owned()).await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movie {
    Table,
    Title,
}

#[derive(DeriveIden)]
enum MovieEdge {
    Table,
    NodeId,
}
