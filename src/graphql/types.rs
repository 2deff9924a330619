use async_graphql::{ComplexObject, Context, Result, SimpleObject};

use crate::{
    models::{DeleteSummary, MovieRecord, RelationKind},
    store::CatalogStore,
};

#[derive(Clone, Debug, SimpleObject)]
pub struct Movie {
    pub title: String,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub runtime: Option<i32>,
    pub rating: Option<f64>,
    pub votes: Option<i32>,
    pub revenue: Option<f64>,
    pub actors_in: Vec<Actor>,
    pub directed_by: Vec<Director>,
    pub genres: Vec<Genre>,
}

impl From<MovieRecord> for Movie {
    fn from(record: MovieRecord) -> Self {
        Self {
            title: record.title,
            description: record.fields.description,
            year: record.fields.year,
            runtime: record.fields.runtime,
            rating: record.fields.rating,
            votes: record.fields.votes,
            revenue: record.fields.revenue,
            actors_in: record.actors.into_iter().map(|name| Actor { name }).collect(),
            directed_by: record.directors.into_iter().map(|name| Director { name }).collect(),
            genres: record.genres.into_iter().map(|genre| Genre { genre }).collect(),
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(complex)]
pub struct Actor {
    pub name: String,
}

#[ComplexObject]
impl Actor {
    async fn movies_in(&self, ctx: &Context<'_>) -> Result<Vec<Movie>> {
        related_movies(ctx, RelationKind::Actor, &self.name).await
    }

    async fn directed_movies(&self, ctx: &Context<'_>) -> Result<Vec<Movie>> {
        related_movies(ctx, RelationKind::Director, &self.name).await
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(complex)]
pub struct Director {
    pub name: String,
}

#[ComplexObject]
impl Director {
    async fn movies_directed(&self, ctx: &Context<'_>) -> Result<Vec<Movie>> {
        related_movies(ctx, RelationKind::Director, &self.name).await
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(complex)]
pub struct Genre {
    pub genre: String,
}

#[ComplexObject]
impl Genre {
    async fn movies_in_genre(&self, ctx: &Context<'_>) -> Result<Vec<Movie>> {
        related_movies(ctx, RelationKind::Genre, &self.genre).await
    }
}

async fn related_movies(ctx: &Context<'_>, kind: RelationKind, name: &str) -> Result<Vec<Movie>> {
    let store = ctx.data::<CatalogStore>()?;
    let records = store.movies_related_to(kind, name).await?;
    Ok(records.into_iter().map(Movie::from).collect())
}

#[derive(Clone, Debug, SimpleObject)]
pub struct CreateMoviesMutationResponse {
    pub movies: Vec<Movie>,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct UpdateMoviesMutationResponse {
    pub movies: Vec<Movie>,
}

#[derive(Clone, Copy, Debug, SimpleObject)]
pub struct DeleteInfo {
    pub nodes_deleted: u64,
    pub relationships_deleted: u64,
}

impl From<DeleteSummary> for DeleteInfo {
    fn from(summary: DeleteSummary) -> Self {
        Self {
            nodes_deleted: summary.nodes_deleted,
            relationships_deleted: summary.relationships_deleted,
        }
    }
}
