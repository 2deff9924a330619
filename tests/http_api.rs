use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use moviegraph::{AppState, config::Config, create_app, db::connect_and_migrate};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> Router {
    let config = Arc::new(Config::in_memory());
    let db = connect_and_migrate(&config.database_url).await.unwrap();
    create_app(Arc::new(AppState::new(config, db, reqwest::Client::new())))
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn graphql(app: &Router, query: &str, variables: Value) -> Value {
    let request = Request::builder()
        .method("POST")
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "query": query, "variables": variables }).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_str(&body_string(response).await).unwrap()
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn graphql_nested_create_and_reverse_lookup() {
    let app = app().await;

    let created = graphql(
        &app,
        r#"mutation {
            createMovies(input: [{
                title: "The Matrix",
                year: 1999,
                actorsIn: { create: [{ node: { name: "Keanu Reeves" } }] },
                genres: { create: [{ node: { genre: "Sci-Fi" } }] }
            }]) { movies { title actorsIn { name } genres { genre } } }
        }"#,
        json!({}),
    )
    .await;
    assert_eq!(created["data"]["createMovies"]["movies"][0]["actorsIn"][0]["name"], "Keanu Reeves");

    let actors = graphql(
        &app,
        r#"query($name: String!) { actors(where: { name: $name }) { name moviesIn { title } } }"#,
        json!({ "name": "Keanu Reeves" }),
    )
    .await;
    assert_eq!(actors["data"]["actors"][0]["moviesIn"][0]["title"], "The Matrix");
}

#[tokio::test]
async fn actor_lists_movies_they_directed() {
    let app = app().await;
    graphql(
        &app,
        r#"mutation {
            createMovies(input: [{
                title: "Unforgiven",
                actorsIn: { create: [{ node: { name: "Clint Eastwood" } }] },
                directedBy: { create: [{ node: { name: "Clint Eastwood" } }] }
            }, {
                title: "Speed",
                actorsIn: { create: [{ node: { name: "Keanu Reeves" } }] }
            }]) { movies { title } }
        }"#,
        json!({}),
    )
    .await;

    let actors = graphql(
        &app,
        "{ actors { name directedMovies { title } } }",
        json!({}),
    )
    .await;
    assert_eq!(
        actors["data"]["actors"],
        json!([
            { "name": "Clint Eastwood", "directedMovies": [{ "title": "Unforgiven" }] },
            { "name": "Keanu Reeves", "directedMovies": [] }
        ])
    );
}

#[tokio::test]
async fn graphql_connect_to_missing_node_is_an_error() {
    let app = app().await;
    let response = graphql(
        &app,
        r#"mutation {
            createMovies(input: [{
                title: "Speed",
                actorsIn: { connect: [{ where: { node: { name: "Nobody" } } }] }
            }]) { movies { title } }
        }"#,
        json!({}),
    )
    .await;
    assert!(response["errors"].as_array().is_some_and(|e| !e.is_empty()));

    let movies = graphql(&app, "{ movies { title } }", json!({})).await;
    assert_eq!(movies["data"]["movies"], json!([]));
}

#[tokio::test]
async fn graphql_accepts_batched_requests() {
    let app = app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!([
                { "query": "{ movies { title } }" },
                { "query": "{ genres { genre } }" }
            ])
            .to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body, json!([{ "data": { "movies": [] } }, { "data": { "genres": [] } }]));
}

#[tokio::test]
async fn form_post_creates_and_lists_movie() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(form_post(
            "/movies",
            "editing=false&title=Heat&description=&year=1995&runtime=&rating=8.3&votes=&revenue=&actors=Al+Pacino&genres=Crime&director=Michael+Mann",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Heat"));
    assert!(html.contains("Michael Mann"));

    let response = app
        .clone()
        .oneshot(form_post("/movies", "editing=false&title=Heat&actors=Val+Kilmer"))
        .await
        .unwrap();
    let html = body_string(response).await;
    assert!(html.contains("A movie with this title already exists."));
    // the rejected input stays in the form, but nothing was written
    assert!(html.contains(r#"value="Val Kilmer""#));

    let movies = graphql(&app, "{ movies { title actorsIn { name } } }", json!({})).await;
    assert_eq!(
        movies["data"]["movies"],
        json!([{ "title": "Heat", "actorsIn": [{ "name": "Al Pacino" }] }])
    );
}

#[tokio::test]
async fn search_and_edit_prefill() {
    let app = app().await;
    app.clone()
        .oneshot(form_post("/movies", "editing=false&title=Heat&actors=Al+Pacino%2C+Robert+De+Niro"))
        .await
        .unwrap();

    let request = Request::builder().uri("/?search=Heat").body(Body::empty()).unwrap();
    let html = body_string(app.clone().oneshot(request).await.unwrap()).await;
    assert!(html.contains("Al Pacino, Robert De Niro"));

    let request = Request::builder().uri("/?edit=Heat").body(Body::empty()).unwrap();
    let html = body_string(app.clone().oneshot(request).await.unwrap()).await;
    assert!(html.contains("readonly"));
    assert!(html.contains(r#"value="true""#));
}

#[tokio::test]
async fn delete_redirects_home() {
    let app = app().await;
    app.clone().oneshot(form_post("/movies", "editing=false&title=Heat")).await.unwrap();

    let response = app.clone().oneshot(form_post("/movies/delete", "title=Heat")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let html = body_string(app.oneshot(request).await.unwrap()).await;
    assert!(html.contains("No movies yet."));
}
