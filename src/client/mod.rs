pub mod queries;
mod transport;

use std::{collections::HashMap, sync::Arc};

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

pub use transport::{
    GraphqlError, GraphqlRequest, GraphqlResponse, HttpTransport, SchemaTransport, Transport,
};

use crate::{
    graphql::CatalogSchema,
    models::{DeleteSummary, MovieFields, MovieRecord, RelationKind},
};
use queries::Operation;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to the catalog API failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog API error: {0}")]
    Graphql(String),
    #[error("unexpected response from the catalog API: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("catalog API returned no data for {0}")]
    MissingData(&'static str),
}

#[derive(Clone)]
pub struct CatalogClient {
    transport: Arc<dyn Transport>,
}

impl CatalogClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn http(http: reqwest::Client, url: String) -> Self {
        Self::new(Arc::new(HttpTransport::new(http, url)))
    }

    pub fn in_process(schema: CatalogSchema) -> Self {
        Self::new(Arc::new(SchemaTransport::new(schema)))
    }

    pub async fn movies(&self) -> Result<Vec<MovieRecord>, ClientError> {
        let data: MoviesData = self.run(&queries::MOVIES, json!({})).await?;
        Ok(data.movies.into_iter().map(Into::into).collect())
    }

    pub async fn movie_by_title(&self, title: &str) -> Result<Option<MovieRecord>, ClientError> {
        let data: MoviesData =
            self.run(&queries::CHECK_MOVIE_BY_TITLE, json!({ "title": title })).await?;
        Ok(data.movies.into_iter().next().map(Into::into))
    }

    pub async fn relation_exists(
        &self,
        kind: RelationKind,
        name: &str,
    ) -> Result<bool, ClientError> {
        let (operation, variable, field) = queries::existence_check(kind);
        let mut data: HashMap<String, Vec<Value>> =
            self.run(&operation, json!({ variable: name })).await?;
        let matches = data.remove(field).ok_or(ClientError::MissingData(operation.name))?;
        Ok(!matches.is_empty())
    }

    pub async fn create_movie(&self, variables: Value) -> Result<Vec<MovieRecord>, ClientError> {
        let data: CreateData = self.run(&queries::CREATE_MOVIE, variables).await?;
        Ok(data.create_movies.movies.into_iter().map(Into::into).collect())
    }

    pub async fn update_movie(&self, variables: Value) -> Result<Vec<MovieRecord>, ClientError> {
        let data: UpdateData = self.run(&queries::UPDATE_MOVIE, variables).await?;
        Ok(data.update_movies.movies.into_iter().map(Into::into).collect())
    }

    pub async fn delete_movie(&self, title: &str) -> Result<DeleteSummary, ClientError> {
        let data: DeleteData = self.run(&queries::DELETE_MOVIE, json!({ "title": title })).await?;
        Ok(DeleteSummary {
            nodes_deleted: data.delete_movies.nodes_deleted,
            relationships_deleted: data.delete_movies.relationships_deleted,
        })
    }

    async fn run<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        variables: Value,
    ) -> Result<T, ClientError> {
        debug!(operation = operation.name, mutation = operation.is_mutation(), "executing operation");

        let response = self
            .transport
            .execute(GraphqlRequest {
                query: operation.document.to_string(),
                operation_name: operation.name.to_string(),
                variables,
            })
            .await?;

        if !response.errors.is_empty() {
            let messages =
                response.errors.into_iter().map(|e| e.message).collect::<Vec<_>>().join("; ");
            return Err(ClientError::Graphql(messages));
        }

        let data = response
            .data
            .filter(|d| !d.is_null())
            .ok_or(ClientError::MissingData(operation.name))?;
        Ok(serde_json::from_value(data)?)
    }
}

#[derive(Debug, Deserialize)]
struct MoviesData {
    movies: Vec<MovieDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateData {
    create_movies: MoviesPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateData {
    update_movies: MoviesPayload,
}

#[derive(Debug, Deserialize)]
struct MoviesPayload {
    movies: Vec<MovieDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteData {
    delete_movies: DeleteDoc,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteDoc {
    nodes_deleted: u64,
    #[serde(default)]
    relationships_deleted: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MovieDoc {
    title: String,
    description: Option<String>,
    year: Option<i32>,
    runtime: Option<i32>,
    rating: Option<f64>,
    votes: Option<i32>,
    revenue: Option<f64>,
    #[serde(default)]
    actors_in: Vec<NamedDoc>,
    #[serde(default)]
    directed_by: Vec<NamedDoc>,
    #[serde(default)]
    genres: Vec<GenreDoc>,
}

#[derive(Debug, Deserialize)]
struct NamedDoc {
    name: String,
}

#[derive(Debug, Deserialize)]
struct GenreDoc {
    genre: String,
}

impl From<MovieDoc> for MovieRecord {
    fn from(doc: MovieDoc) -> Self {
        Self {
            title: doc.title,
            fields: MovieFields {
                description: doc.description,
                year: doc.year,
                runtime: doc.runtime,
                rating: doc.rating,
                votes: doc.votes,
                revenue: doc.revenue,
            },
            actors: doc.actors_in.into_iter().map(|a| a.name).collect(),
            directors: doc.directed_by.into_iter().map(|d| d.name).collect(),
            genres: doc.genres.into_iter().map(|g| g.genre).collect(),
        }
    }
}
