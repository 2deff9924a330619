mod inputs;
mod mutation;
mod query;
mod types;

use std::sync::Arc;

use async_graphql::{EmptySubscription, Schema, http::GraphiQLSource};
use async_graphql_axum::{GraphQLBatchRequest, GraphQLResponse};
use axum::{extract::State, response::Html};

pub use inputs::*;
pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use types::*;

use crate::{AppState, store::CatalogStore};

pub type CatalogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(store: CatalogStore) -> CatalogSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription).data(store).finish()
}

pub async fn graphql_handler(
    State(state): State<Arc<AppState>>,
    req: GraphQLBatchRequest,
) -> GraphQLResponse {
    let response = state.schema.execute_batch(req.into_inner()).await;
    if !response.is_ok() {
        tracing::warn!("graphql request failed");
    }
    response.into()
}

pub async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
