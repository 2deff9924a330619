pub mod client;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod form;
pub mod graphql;
pub mod models;
pub mod names;
pub mod reconcile;
pub mod routes;
pub mod store;
pub mod submit;
pub mod templates;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    client::CatalogClient,
    config::Config,
    graphql::{CatalogSchema, build_schema},
    store::CatalogStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub schema: CatalogSchema,
    pub client: CatalogClient,
}

impl AppState {
    pub fn new(config: Arc<Config>, db: DatabaseConnection, http: reqwest::Client) -> Self {
        let schema = build_schema(CatalogStore::new(db));
        let client = match &config.graphql_url {
            Some(url) => CatalogClient::http(http, url.clone()),
            None => CatalogClient::in_process(schema.clone()),
        };
        Self { config, schema, client }
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/movies", post(routes::save))
        .route("/movies/delete", post(routes::delete))
        .route("/graphql", get(graphql::graphiql).post(graphql::graphql_handler))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
