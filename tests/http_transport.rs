use std::{net::SocketAddr, sync::Arc};

use axum::{Router, routing::post};
use moviegraph::{
    AppState,
    client::{CatalogClient, ClientError},
    config::Config,
    create_app,
    db::connect_and_migrate,
    form::MovieForm,
    submit::{SaveError, SaveOutcome, save_movie},
};
use tokio::net::TcpListener;

fn http() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn catalog_server() -> SocketAddr {
    let config = Arc::new(Config::in_memory());
    let db = connect_and_migrate(&config.database_url).await.unwrap();
    serve(create_app(Arc::new(AppState::new(config, db, http())))).await
}

fn heat() -> MovieForm {
    MovieForm {
        title: "Heat".to_string(),
        actors: "Al Pacino, Robert De Niro".to_string(),
        director: "Michael Mann".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn http_client_round_trip() {
    let addr = catalog_server().await;
    let client = CatalogClient::http(http(), format!("http://{addr}/graphql"));

    let outcome = save_movie(&client, &heat(), false).await.unwrap();
    assert!(matches!(outcome, SaveOutcome::Created(_)));

    let movies = client.movies().await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].actors, vec!["Al Pacino", "Robert De Niro"]);
    assert!(matches!(
        save_movie(&client, &heat(), false).await.unwrap(),
        SaveOutcome::DuplicateTitle
    ));
}

#[tokio::test]
async fn configured_url_routes_front_end_to_remote_api() {
    let addr = catalog_server().await;
    let config = Arc::new(Config {
        graphql_url: Some(format!("http://{addr}/graphql")),
        ..Config::in_memory()
    });
    let db = connect_and_migrate(&config.database_url).await.unwrap();
    let state = AppState::new(config, db, http());

    save_movie(&state.client, &heat(), false).await.unwrap();

    let remote = CatalogClient::http(http(), format!("http://{addr}/graphql"));
    assert_eq!(remote.movies().await.unwrap().len(), 1);

    let local = state.schema.execute("{ movies { title } }").await;
    assert_eq!(local.data.into_json().unwrap(), serde_json::json!({ "movies": [] }));
}

#[tokio::test]
async fn unreachable_api_aborts_before_any_write() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = CatalogClient::http(http(), format!("http://{addr}/graphql"));
    let err = save_movie(&client, &heat(), false).await.unwrap_err();
    assert!(matches!(err, SaveError::TitleCheck(ClientError::Http(_))));
}

#[tokio::test]
async fn error_status_becomes_client_error() {
    let addr = catalog_server().await;
    let client = CatalogClient::http(http(), format!("http://{addr}/missing"));

    let err = client.movies().await.unwrap_err();
    assert!(matches!(&err, ClientError::Http(e) if e.status().is_some_and(|s| s.as_u16() == 404)));
}

#[tokio::test]
async fn non_json_body_becomes_client_error() {
    let addr = serve(Router::new().route("/graphql", post(|| async { "not json" }))).await;
    let client = CatalogClient::http(http(), format!("http://{addr}/graphql"));

    let err = client.movie_by_title("Heat").await.unwrap_err();
    assert!(matches!(&err, ClientError::Http(e) if e.is_decode()));
}
