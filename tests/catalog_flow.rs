use std::sync::{Arc, Mutex};

use futures::{FutureExt, future::BoxFuture};
use moviegraph::{
    client::{
        CatalogClient, ClientError, GraphqlRequest, GraphqlResponse, SchemaTransport, Transport,
    },
    db::connect_and_migrate,
    form::MovieForm,
    graphql::build_schema,
    store::CatalogStore,
    submit::{SaveError, SaveOutcome, save_movie},
};

/// Records every operation name and forwards to the in-process schema.
/// Names listed in `fail_on` return an error instead.
struct RecordingTransport {
    inner: SchemaTransport,
    calls: Mutex<Vec<String>>,
    fail_on: Vec<&'static str>,
}

impl RecordingTransport {
    fn mutations(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|name| matches!(name.as_str(), "CreateMovie" | "UpdateMovie" | "DeleteMovie"))
            .cloned()
            .collect()
    }

    fn reset(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl Transport for RecordingTransport {
    fn execute(&self, request: GraphqlRequest) -> BoxFuture<'_, Result<GraphqlResponse, ClientError>> {
        self.calls.lock().unwrap().push(request.operation_name.clone());
        if self.fail_on.contains(&request.operation_name.as_str()) {
            return async { Err(ClientError::Graphql("lookup offline".to_string())) }.boxed();
        }
        self.inner.execute(request)
    }
}

async fn setup(fail_on: Vec<&'static str>) -> (CatalogClient, Arc<RecordingTransport>) {
    let db = connect_and_migrate("sqlite::memory:").await.unwrap();
    let schema = build_schema(CatalogStore::new(db));
    let transport = Arc::new(RecordingTransport {
        inner: SchemaTransport::new(schema),
        calls: Mutex::new(Vec::new()),
        fail_on,
    });
    (CatalogClient::new(transport.clone()), transport)
}

fn form(title: &str, actors: &str, genres: &str, director: &str) -> MovieForm {
    MovieForm {
        title: title.to_string(),
        year: "1995".to_string(),
        rating: "8.3".to_string(),
        actors: actors.to_string(),
        genres: genres.to_string(),
        director: director.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn new_title_issues_one_create() {
    let (client, transport) = setup(vec![]).await;

    let outcome = save_movie(&client, &form("Heat", "Al Pacino, Robert De Niro", "Crime", "Michael Mann"), false)
        .await
        .unwrap();

    let SaveOutcome::Created(movies) = outcome else { panic!("expected a create") };
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].actors, vec!["Al Pacino", "Robert De Niro"]);
    assert_eq!(movies[0].directors, vec!["Michael Mann"]);
    assert_eq!(movies[0].fields.year, Some(1995));
    assert_eq!(transport.mutations(), vec!["CreateMovie"]);

    let calls = transport.calls.lock().unwrap().clone();
    assert_eq!(calls[0], "CheckMovieByTitle");
    assert_eq!(calls.iter().filter(|c| *c == "CheckActorExistence").count(), 2);
}

#[tokio::test]
async fn duplicate_title_writes_nothing() {
    let (client, transport) = setup(vec![]).await;
    save_movie(&client, &form("Heat", "Al Pacino", "", ""), false).await.unwrap();
    transport.reset();

    let outcome = save_movie(&client, &form("Heat", "Val Kilmer", "", ""), false).await.unwrap();
    assert!(matches!(outcome, SaveOutcome::DuplicateTitle));
    assert!(transport.mutations().is_empty());

    let movies = client.movies().await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].actors, vec!["Al Pacino"]);
}

#[tokio::test]
async fn second_movie_connects_existing_nodes() {
    let (client, _) = setup(vec![]).await;
    save_movie(&client, &form("Heat", "Al Pacino", "Crime", "Michael Mann"), false).await.unwrap();
    save_movie(&client, &form("Collateral", "Tom Cruise", "Crime", "Michael Mann"), false)
        .await
        .unwrap();

    let movies = client.movies().await.unwrap();
    let titles: Vec<_> = movies.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Collateral", "Heat"]);
    assert!(movies.iter().all(|m| m.genres == vec!["Crime"]));
    assert!(client.relation_exists(moviegraph::models::RelationKind::Genre, "Crime").await.unwrap());
}

#[tokio::test]
async fn edit_replaces_relation_set() {
    let (client, transport) = setup(vec![]).await;
    save_movie(&client, &form("Heat", "A, B", "Crime", "Michael Mann"), false).await.unwrap();
    transport.reset();

    let mut edited = form("Heat", "B, C", "", "Michael Mann");
    edited.year = "1996".to_string();
    let outcome = save_movie(&client, &edited, true).await.unwrap();
    assert!(matches!(outcome, SaveOutcome::Updated(_)));
    assert_eq!(transport.mutations(), vec!["UpdateMovie"]);

    let movie = client.movie_by_title("Heat").await.unwrap().unwrap();
    assert_eq!(movie.actors, vec!["B", "C"]);
    assert!(movie.genres.is_empty());
    assert_eq!(movie.directors, vec!["Michael Mann"]);
    assert_eq!(movie.fields.year, Some(1996));

    // "A" stays in the catalog after losing its last movie
    assert!(client.relation_exists(moviegraph::models::RelationKind::Actor, "A").await.unwrap());
}

#[tokio::test]
async fn edit_with_blank_fields_clears_them() {
    let (client, _) = setup(vec![]).await;
    let mut created = form("Heat", "Al Pacino", "Crime", "");
    created.description = "cops".to_string();
    save_movie(&client, &created, false).await.unwrap();

    let mut edited = form("Heat", "Al Pacino", "Crime", "");
    edited.year = String::new();
    edited.rating = "8.5".to_string();
    save_movie(&client, &edited, true).await.unwrap();

    let movie = client.movie_by_title("Heat").await.unwrap().unwrap();
    assert_eq!(movie.fields.description, None);
    assert_eq!(movie.fields.year, None);
    assert_eq!(movie.fields.rating, Some(8.5));
}

#[tokio::test]
async fn title_whitespace_does_not_dodge_duplicate_check() {
    let (client, transport) = setup(vec![]).await;
    save_movie(&client, &form("The Matrix", "", "", ""), false).await.unwrap();
    transport.reset();

    let outcome = save_movie(&client, &form("  The   Matrix", "", "", ""), false).await.unwrap();
    assert!(matches!(outcome, SaveOutcome::DuplicateTitle));
    assert!(transport.mutations().is_empty());
    assert_eq!(client.movies().await.unwrap().len(), 1);
}

#[tokio::test]
async fn editing_a_missing_movie_fails() {
    let (client, transport) = setup(vec![]).await;
    let err = save_movie(&client, &form("Ghost", "", "", ""), true).await.unwrap_err();
    assert!(matches!(err, SaveError::MissingForEdit(title) if title == "Ghost"));
    assert!(transport.mutations().is_empty());
}

#[tokio::test]
async fn failed_lookup_aborts_save() {
    let (client, transport) = setup(vec!["CheckActorExistence"]).await;
    let err = save_movie(&client, &form("Heat", "Al Pacino", "Crime", ""), false).await.unwrap_err();
    assert!(matches!(err, SaveError::Reconcile(_)));
    assert!(transport.mutations().is_empty());
    assert!(client.movies().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_removes_movie_but_keeps_people() {
    let (client, _) = setup(vec![]).await;
    save_movie(&client, &form("Heat", "Al Pacino, Val Kilmer", "Crime", ""), false).await.unwrap();

    let summary = client.delete_movie("Heat").await.unwrap();
    assert_eq!(summary.nodes_deleted, 1);
    assert_eq!(summary.relationships_deleted, 3);
    assert!(client.movies().await.unwrap().is_empty());
    assert!(client.relation_exists(moviegraph::models::RelationKind::Actor, "Val Kilmer").await.unwrap());
}
