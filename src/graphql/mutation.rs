use async_graphql::{Context, Object, Result};
use tracing::info;

use super::{
    inputs::{MovieCreateInput, MovieUpdateInput, MovieWhere},
    types::{CreateMoviesMutationResponse, DeleteInfo, Movie, UpdateMoviesMutationResponse},
};
use crate::{models::MovieFilter, store::CatalogStore};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_movies(
        &self,
        ctx: &Context<'_>,
        input: Vec<MovieCreateInput>,
    ) -> Result<CreateMoviesMutationResponse> {
        let store = ctx.data::<CatalogStore>()?;
        let inputs = input.into_iter().map(MovieCreateInput::into_new_movie).collect::<Vec<_>>();
        let titles = inputs.iter().map(|m| m.title.as_str()).collect::<Vec<_>>().join(", ");
        info!(titles = %titles, "creating movies");

        let records = store.create_movies(inputs).await?;
        Ok(CreateMoviesMutationResponse { movies: records.into_iter().map(Movie::from).collect() })
    }

    /// Without `where`, every movie is updated.
    async fn update_movies(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "where")] filter: Option<MovieWhere>,
        update: Option<MovieUpdateInput>,
    ) -> Result<UpdateMoviesMutationResponse> {
        let store = ctx.data::<CatalogStore>()?;
        let filter: MovieFilter = filter.map(Into::into).unwrap_or_default();
        let changes = update.unwrap_or_default().into_changes();
        info!(title = ?filter.title, relations = changes.relations.len(), "updating movies");

        let records = store.update_movies(&filter, changes).await?;
        Ok(UpdateMoviesMutationResponse { movies: records.into_iter().map(Movie::from).collect() })
    }

    /// Without `where`, every movie is deleted.
    async fn delete_movies(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "where")] filter: Option<MovieWhere>,
    ) -> Result<DeleteInfo> {
        let store = ctx.data::<CatalogStore>()?;
        let filter: MovieFilter = filter.map(Into::into).unwrap_or_default();
        info!(title = ?filter.title, "deleting movies");

        let summary = store.delete_movies(&filter).await?;
        Ok(summary.into())
    }
}
