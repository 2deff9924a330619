use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No unique index on title: uniqueness is checked by the client before create.
        manager
            .create_table(
                Table::create()
                    .table(Movie::Table)
                    .if_not_exists()
                    .col(pk_auto(Movie::Id))
                    .col(string(Movie::Title))
                    .col(string_null(Movie::Description))
                    .col(integer_null(Movie::Year))
                    .col(integer_null(Movie::Runtime))
                    .col(double_null(Movie::Rating))
                    .col(integer_null(Movie::Votes))
                    .col(double_null(Movie::Revenue))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RelatedNode::Table)
                    .if_not_exists()
                    .col(pk_auto(RelatedNode::Id))
                    .col(string(RelatedNode::Label))
                    .col(string(RelatedNode::Name))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_related_node_label_name")
                    .table(RelatedNode::Table)
                    .col(RelatedNode::Label)
                    .col(RelatedNode::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MovieEdge::Table)
                    .if_not_exists()
                    .col(integer(MovieEdge::MovieId))
                    .col(integer(MovieEdge::NodeId))
                    .col(string(MovieEdge::RelType))
                    .primary_key(Index::create().col(MovieEdge::MovieId).col(MovieEdge::NodeId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_edge_movie")
                            .from(MovieEdge::Table, MovieEdge::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_edge_node")
                            .from(MovieEdge::Table, MovieEdge::NodeId)
                            .to(RelatedNode::Table, RelatedNode::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MovieEdge::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(RelatedNode::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Movie::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movie {
    Table,
    Id,
    Title,
    Description,
    Year,
    Runtime,
    Rating,
    Votes,
    Revenue,
}

#[derive(DeriveIden)]
enum RelatedNode {
    Table,
    Id,
    Label,
    Name,
}

#[derive(DeriveIden)]
enum MovieEdge {
    Table,
    MovieId,
    NodeId,
    RelType,
}
