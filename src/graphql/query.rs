use async_graphql::{Context, Object, Result};

use super::{
    inputs::{ActorWhere, DirectorWhere, GenreWhere, MovieWhere},
    types::{Actor, Director, Genre, Movie},
};
use crate::{
    models::{MovieFilter, RelationKind},
    store::CatalogStore,
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn movies(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "where")] filter: Option<MovieWhere>,
    ) -> Result<Vec<Movie>> {
        let store = ctx.data::<CatalogStore>()?;
        let filter: MovieFilter = filter.map(Into::into).unwrap_or_default();
        let records = store.movies(&filter).await?;
        Ok(records.into_iter().map(Movie::from).collect())
    }

    async fn actors(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "where")] filter: Option<ActorWhere>,
    ) -> Result<Vec<Actor>> {
        let name = filter.and_then(|w| w.name);
        let names = node_names(ctx, RelationKind::Actor, name.as_deref()).await?;
        Ok(names.into_iter().map(|name| Actor { name }).collect())
    }

    async fn directors(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "where")] filter: Option<DirectorWhere>,
    ) -> Result<Vec<Director>> {
        let name = filter.and_then(|w| w.name);
        let names = node_names(ctx, RelationKind::Director, name.as_deref()).await?;
        Ok(names.into_iter().map(|name| Director { name }).collect())
    }

    async fn genres(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "where")] filter: Option<GenreWhere>,
    ) -> Result<Vec<Genre>> {
        let genre = filter.and_then(|w| w.genre);
        let names = node_names(ctx, RelationKind::Genre, genre.as_deref()).await?;
        Ok(names.into_iter().map(|genre| Genre { genre }).collect())
    }
}

async fn node_names(
    ctx: &Context<'_>,
    kind: RelationKind,
    name: Option<&str>,
) -> Result<Vec<String>> {
    let store = ctx.data::<CatalogStore>()?;
    Ok(store.node_names(kind, name).await?)
}
