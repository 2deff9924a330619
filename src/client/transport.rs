use async_graphql::Variables;
use futures::{FutureExt, future::BoxFuture};
use serde::{Deserialize, Serialize};

use super::ClientError;
use crate::graphql::CatalogSchema;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    pub query: String,
    pub operation_name: String,
    pub variables: serde_json::Value,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

pub trait Transport: Send + Sync {
    fn execute(&self, request: GraphqlRequest) -> BoxFuture<'_, Result<GraphqlResponse, ClientError>>;
}

pub struct HttpTransport {
    http: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(http: reqwest::Client, url: String) -> Self {
        Self { http, url }
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: GraphqlRequest) -> BoxFuture<'_, Result<GraphqlResponse, ClientError>> {
        async move {
            let response = self
                .http
                .post(&self.url)
                .json(&request)
                .send()
                .await?
                .error_for_status()?
                .json::<GraphqlResponse>()
                .await?;
            Ok(response)
        }
        .boxed()
    }
}

pub struct SchemaTransport {
    schema: CatalogSchema,
}

impl SchemaTransport {
    pub fn new(schema: CatalogSchema) -> Self {
        Self { schema }
    }
}

impl Transport for SchemaTransport {
    fn execute(&self, request: GraphqlRequest) -> BoxFuture<'_, Result<GraphqlResponse, ClientError>> {
        async move {
            let request = async_graphql::Request::new(request.query)
                .operation_name(request.operation_name)
                .variables(Variables::from_json(request.variables));
            let response = self.schema.execute(request).await;
            let value = serde_json::to_value(&response)?;
            Ok(serde_json::from_value(value)?)
        }
        .boxed()
    }
}
