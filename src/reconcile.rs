use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::{
    client::ClientError,
    models::{MovieFields, RelationKind},
    names::normalize_name,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SaveMode {
    Create,
    Update,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RelationIntent {
    Connect(String),
    Create(String),
}

impl RelationIntent {
    pub fn name(&self) -> &str {
        match self {
            RelationIntent::Connect(name) | RelationIntent::Create(name) => name,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RelationPlan {
    pub kind: RelationKind,
    /// Disconnect every existing edge of `kind` before applying `intents`.
    pub replace_existing: bool,
    pub intents: Vec<RelationIntent>,
}

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("{kind} name must not be empty")]
    EmptyName { kind: RelationKind },
    #[error("could not check whether {kind} \"{name}\" exists: {source}")]
    Lookup {
        kind: RelationKind,
        name: String,
        #[source]
        source: ClientError,
    },
}

pub fn reconcile_name(
    kind: RelationKind,
    name: &str,
    exists: bool,
) -> Result<RelationIntent, ReconcileError> {
    let name = normalize_name(name);
    if name.is_empty() {
        return Err(ReconcileError::EmptyName { kind });
    }
    Ok(if exists { RelationIntent::Connect(name) } else { RelationIntent::Create(name) })
}

pub fn reconcile(
    kind: RelationKind,
    checked: &[(String, bool)],
    mode: SaveMode,
) -> Result<RelationPlan, ReconcileError> {
    let intents = checked
        .iter()
        .map(|(name, exists)| reconcile_name(kind, name, *exists))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RelationPlan { kind, replace_existing: mode == SaveMode::Update, intents })
}

pub fn create_variables(title: &str, fields: &MovieFields, plans: &[RelationPlan]) -> Value {
    let mut input = Map::new();
    input.insert("title".to_string(), json!(title));
    for (key, value) in scalar_entries(fields) {
        if !value.is_null() {
            input.insert(key.to_string(), value);
        }
    }

    for plan in plans {
        let nested = nested_changes(plan);
        if !nested.is_empty() {
            input.insert(plan.kind.movie_field().to_string(), Value::Object(nested));
        }
    }

    json!({ "input": [Value::Object(input)] })
}

/// Variables for the `UpdateMovie` operation. Every scalar is sent, so a blank
/// form field clears the stored value.
pub fn update_variables(title: &str, fields: &MovieFields, plans: &[RelationPlan]) -> Value {
    let mut vars = Map::new();
    vars.insert("title".to_string(), json!(title));
    for (key, value) in scalar_entries(fields) {
        vars.insert(key.to_string(), value);
    }
    for kind in RelationKind::ALL {
        vars.insert(kind.movie_field().to_string(), Value::Null);
    }

    for plan in plans {
        let mut entries = Vec::new();
        if plan.replace_existing {
            entries.push(json!({ "disconnect": [{}] }));
        }
        let nested = nested_changes(plan);
        if !nested.is_empty() {
            entries.push(Value::Object(nested));
        }
        if !entries.is_empty() {
            vars.insert(plan.kind.movie_field().to_string(), Value::Array(entries));
        }
    }

    Value::Object(vars)
}

fn nested_changes(plan: &RelationPlan) -> Map<String, Value> {
    let key = plan.kind.key_field();
    let mut connect = Vec::new();
    let mut create = Vec::new();

    for intent in &plan.intents {
        match intent {
            RelationIntent::Connect(name) => {
                connect.push(json!({ "where": { "node": { key: name } } }))
            },
            RelationIntent::Create(name) => create.push(json!({ "node": { key: name } })),
        }
    }

    let mut out = Map::new();
    if !connect.is_empty() {
        out.insert("connect".to_string(), Value::Array(connect));
    }
    if !create.is_empty() {
        out.insert("create".to_string(), Value::Array(create));
    }
    out
}

fn scalar_entries(fields: &MovieFields) -> [(&'static str, Value); 6] {
    [
        ("description", json!(fields.description)),
        ("year", json!(fields.year)),
        ("runtime", json!(fields.runtime)),
        ("rating", json!(fields.rating)),
        ("votes", json!(fields.votes)),
        ("revenue", json!(fields.revenue)),
    ]
}
