use thiserror::Error;
use tracing::{debug, info};

use crate::{
    client::{CatalogClient, ClientError},
    form::{FormError, MovieForm},
    models::{MovieRecord, RelationKind},
    names::split_names,
    reconcile::{self, ReconcileError, RelationPlan, SaveMode},
};

pub const DUPLICATE_TITLE_MESSAGE: &str = "A movie with this title already exists.";

#[derive(Debug)]
pub enum SaveOutcome {
    Created(Vec<MovieRecord>),
    Updated(Vec<MovieRecord>),
    DuplicateTitle,
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("could not check for an existing movie: {0}")]
    TitleCheck(#[source] ClientError),
    #[error("\"{0}\" no longer exists")]
    MissingForEdit(String),
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
    #[error("saving the movie failed: {0}")]
    Mutation(#[source] ClientError),
}

pub async fn save_movie(
    client: &CatalogClient,
    form: &MovieForm,
    editing: bool,
) -> Result<SaveOutcome, SaveError> {
    let draft = form.parse()?;
    let mode = if editing { SaveMode::Update } else { SaveMode::Create };

    let existing = client.movie_by_title(&draft.title).await.map_err(SaveError::TitleCheck)?;
    match (mode, existing.is_some()) {
        (SaveMode::Create, true) => {
            info!(title = %draft.title, "duplicate title, nothing saved");
            return Ok(SaveOutcome::DuplicateTitle);
        },
        (SaveMode::Update, false) => return Err(SaveError::MissingForEdit(draft.title)),
        _ => {},
    }

    let mut plans = Vec::with_capacity(RelationKind::ALL.len());
    for kind in RelationKind::ALL {
        plans.push(plan_relation(client, kind, form.relation_text(kind), mode).await?);
    }

    match mode {
        SaveMode::Create => {
            let variables = reconcile::create_variables(&draft.title, &draft.fields, &plans);
            let created = client.create_movie(variables).await.map_err(SaveError::Mutation)?;
            info!(title = %draft.title, "movie created");
            Ok(SaveOutcome::Created(created))
        },
        SaveMode::Update => {
            let variables = reconcile::update_variables(&draft.title, &draft.fields, &plans);
            let updated = client.update_movie(variables).await.map_err(SaveError::Mutation)?;
            info!(title = %draft.title, "movie updated");
            Ok(SaveOutcome::Updated(updated))
        },
    }
}

async fn plan_relation(
    client: &CatalogClient,
    kind: RelationKind,
    raw: &str,
    mode: SaveMode,
) -> Result<RelationPlan, ReconcileError> {
    let mut checked = Vec::new();
    for name in split_names(raw) {
        let exists = client
            .relation_exists(kind, &name)
            .await
            .map_err(|source| ReconcileError::Lookup { kind, name: name.clone(), source })?;
        debug!(%kind, name = %name, exists, "relation lookup");
        checked.push((name, exists));
    }

    reconcile::reconcile(kind, &checked, mode)
}
