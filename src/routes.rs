use std::sync::Arc;

use axum::{
    extract::{Form, Query, State},
    response::{Html, Redirect},
};
use jiff::{SignedDuration, Timestamp};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    AppState,
    error::AppResult,
    form::{FormAction, FormField, FormState, reduce},
    models::{DeleteRequest, SearchResult},
    submit::{self, DUPLICATE_TITLE_MESSAGE, SaveOutcome},
    templates,
};

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    search: Option<String>,
    edit: Option<String>,
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IndexQuery>,
) -> AppResult<Html<String>> {
    let mut form = FormState::default();

    if let Some(title) = q.edit.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        form = match state.client.movie_by_title(title).await {
            Ok(Some(movie)) => reduce(&form, FormAction::BeginEdit(movie)),
            Ok(None) => reduce(&form, FormAction::Failed(format!("\"{title}\" no longer exists"))),
            Err(err) => reduce(&form, FormAction::Failed(err.to_string())),
        };
    }

    let search = match q.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => Some(search_movie(&state, title).await),
        None => None,
    };

    render(&state, form, search.as_ref()).await
}

pub async fn save(
    State(state): State<Arc<AppState>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Html<String>> {
    let mut form = FormState::default();
    let mut editing = false;
    for (name, value) in pairs {
        if name == "editing" {
            editing = value == "true";
        } else if let Some(field) = FormField::from_name(&name) {
            form = reduce(&form, FormAction::Input { field, value });
        }
    }
    form.editing = editing;

    let now = Timestamp::now();
    let form = match submit::save_movie(&state.client, &form.fields, editing).await {
        Ok(SaveOutcome::DuplicateTitle) => reduce(
            &form,
            FormAction::Rejected {
                message: DUPLICATE_TITLE_MESSAGE.to_string(),
                expires_at: notice_deadline(now, &state),
            },
        ),
        Ok(SaveOutcome::Created(movies) | SaveOutcome::Updated(movies)) => {
            info!(count = movies.len(), "save finished");
            reduce(&form, FormAction::Saved)
        },
        Err(err) => {
            warn!(error = %err, "save failed");
            reduce(&form, FormAction::Failed(err.to_string()))
        },
    };

    render(&state, form, None).await
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Form(req): Form<DeleteRequest>,
) -> AppResult<Redirect> {
    let summary = state.client.delete_movie(&req.title).await?;
    info!(
        title = %req.title,
        nodes = summary.nodes_deleted,
        relationships = summary.relationships_deleted,
        "movie deleted"
    );
    Ok(Redirect::to("/"))
}

async fn search_movie(state: &AppState, title: &str) -> SearchResult {
    let movie = match state.client.movie_by_title(title).await {
        Ok(movie) => movie,
        Err(err) => {
            warn!(title = %title, error = %err, "search failed");
            None
        },
    };
    SearchResult { title: title.to_string(), movie }
}

async fn render(
    state: &AppState,
    form: FormState,
    search: Option<&SearchResult>,
) -> AppResult<Html<String>> {
    let now = Timestamp::now();
    let form = reduce(&form, FormAction::Tick(now));
    let movies = state.client.movies().await?;
    Ok(Html(templates::index_page(&form, search, &movies, now)))
}

fn notice_deadline(now: Timestamp, state: &AppState) -> Timestamp {
    let ttl = SignedDuration::try_from(state.config.notice_ttl).unwrap_or(SignedDuration::ZERO);
    now.checked_add(ttl).unwrap_or(now)
}
