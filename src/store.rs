use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use thiserror::Error;
use tracing::debug;

use crate::{
    entities::{movie, movie_edge, related_node},
    models::{
        DeleteSummary, Disconnect, FieldEdits, MovieChanges, MovieFields, MovieFilter, MovieRecord,
        NewMovie, RelationChange, RelationKind,
    },
    names::normalize_name,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no {kind} named \"{name}\" to connect")]
    MissingNode { kind: RelationKind, name: String },
    #[error("{kind} \"{name}\" already exists")]
    DuplicateNode { kind: RelationKind, name: String },
    #[error("{kind} name must not be empty")]
    EmptyName { kind: RelationKind },
    #[error("movie title must not be empty")]
    EmptyTitle,
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Clone)]
pub struct CatalogStore {
    db: DatabaseConnection,
}

impl CatalogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn movies(&self, filter: &MovieFilter) -> StoreResult<Vec<MovieRecord>> {
        let rows = find_movies(&self.db, filter).await?;
        load_records(&self.db, rows).await
    }

    pub async fn node_names(
        &self,
        kind: RelationKind,
        name: Option<&str>,
    ) -> StoreResult<Vec<String>> {
        let mut query =
            related_node::Entity::find().filter(related_node::Column::Label.eq(kind.label()));
        if let Some(name) = name {
            query = query.filter(related_node::Column::Name.eq(normalize_name(name)));
        }

        let nodes = query.order_by_asc(related_node::Column::Name).all(&self.db).await?;
        Ok(nodes.into_iter().map(|n| n.name).collect())
    }

    pub async fn movies_related_to(
        &self,
        kind: RelationKind,
        name: &str,
    ) -> StoreResult<Vec<MovieRecord>> {
        let Some(node) = find_node(&self.db, kind, &normalize_name(name)).await? else {
            return Ok(Vec::new());
        };

        let movie_ids: Vec<i32> = movie_edge::Entity::find()
            .filter(movie_edge::Column::NodeId.eq(node.id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|e| e.movie_id)
            .collect();

        let rows = movie::Entity::find()
            .filter(movie::Column::Id.is_in(movie_ids))
            .order_by_asc(movie::Column::Title)
            .all(&self.db)
            .await?;

        load_records(&self.db, rows).await
    }

    pub async fn create_movies(&self, inputs: Vec<NewMovie>) -> StoreResult<Vec<MovieRecord>> {
        let txn = self.db.begin().await?;
        let mut created = Vec::with_capacity(inputs.len());

        for input in inputs {
            let title = normalize_name(&input.title);
            if title.is_empty() {
                return Err(StoreError::EmptyTitle);
            }

            let model = movie::ActiveModel {
                id: Default::default(),
                title: Set(title),
                description: Set(input.fields.description),
                year: Set(input.fields.year),
                runtime: Set(input.fields.runtime),
                rating: Set(input.fields.rating),
                votes: Set(input.fields.votes),
                revenue: Set(input.fields.revenue),
            };
            let row = model.insert(&txn).await?;

            for change in &input.relations {
                apply_relation_change(&txn, row.id, change).await?;
            }
            created.push(row);
        }

        let records = load_records(&txn, created).await?;
        txn.commit().await?;

        debug!(count = records.len(), "created movies");
        Ok(records)
    }

    pub async fn update_movies(
        &self,
        filter: &MovieFilter,
        changes: MovieChanges,
    ) -> StoreResult<Vec<MovieRecord>> {
        let txn = self.db.begin().await?;
        let rows = find_movies(&txn, filter).await?;
        let mut updated = Vec::with_capacity(rows.len());

        for row in rows {
            let id = row.id;
            let mut active: movie::ActiveModel = row.clone().into();
            apply_fields(&mut active, &changes.fields);
            let row = if active.is_changed() { active.update(&txn).await? } else { row };

            for change in &changes.relations {
                apply_relation_change(&txn, id, change).await?;
            }
            updated.push(row);
        }

        let records = load_records(&txn, updated).await?;
        txn.commit().await?;

        debug!(title = ?filter.title, count = records.len(), "updated movies");
        Ok(records)
    }

    /// Deletes matching movies and their edges. Related nodes are kept.
    pub async fn delete_movies(&self, filter: &MovieFilter) -> StoreResult<DeleteSummary> {
        let txn = self.db.begin().await?;
        let ids: Vec<i32> = find_movies(&txn, filter).await?.iter().map(|m| m.id).collect();
        if ids.is_empty() {
            return Ok(DeleteSummary::default());
        }

        let edges = movie_edge::Entity::delete_many()
            .filter(movie_edge::Column::MovieId.is_in(ids.clone()))
            .exec(&txn)
            .await?;
        let movies =
            movie::Entity::delete_many().filter(movie::Column::Id.is_in(ids)).exec(&txn).await?;

        txn.commit().await?;

        let summary = DeleteSummary {
            nodes_deleted: movies.rows_affected,
            relationships_deleted: edges.rows_affected,
        };
        debug!(title = ?filter.title, ?summary, "deleted movies");
        Ok(summary)
    }
}

async fn find_movies<C: ConnectionTrait>(
    conn: &C,
    filter: &MovieFilter,
) -> StoreResult<Vec<movie::Model>> {
    let mut query = movie::Entity::find();
    if let Some(title) = &filter.title {
        query = query.filter(movie::Column::Title.eq(normalize_name(title)));
    }
    Ok(query.order_by_asc(movie::Column::Title).order_by_asc(movie::Column::Id).all(conn).await?)
}

async fn find_node<C: ConnectionTrait>(
    conn: &C,
    kind: RelationKind,
    name: &str,
) -> StoreResult<Option<related_node::Model>> {
    Ok(related_node::Entity::find()
        .filter(related_node::Column::Label.eq(kind.label()))
        .filter(related_node::Column::Name.eq(name))
        .one(conn)
        .await?)
}

async fn load_records<C: ConnectionTrait>(
    conn: &C,
    rows: Vec<movie::Model>,
) -> StoreResult<Vec<MovieRecord>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = rows.iter().map(|m| m.id).collect();
    let edges =
        movie_edge::Entity::find().filter(movie_edge::Column::MovieId.is_in(ids)).all(conn).await?;

    let node_ids: Vec<i32> = edges.iter().map(|e| e.node_id).collect();
    let nodes: HashMap<i32, related_node::Model> = related_node::Entity::find()
        .filter(related_node::Column::Id.is_in(node_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|n| (n.id, n))
        .collect();

    let mut index = HashMap::with_capacity(rows.len());
    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        index.insert(row.id, i);
        records.push(record_from_row(row));
    }

    for edge in edges {
        let (Some(&i), Some(node)) = (index.get(&edge.movie_id), nodes.get(&edge.node_id)) else {
            continue;
        };
        let Some(kind) = RelationKind::from_label(&node.label) else {
            continue;
        };
        records[i].names_mut(kind).push(node.name.clone());
    }

    for record in &mut records {
        record.actors.sort();
        record.directors.sort();
        record.genres.sort();
    }

    Ok(records)
}

fn record_from_row(row: movie::Model) -> MovieRecord {
    MovieRecord {
        title: row.title,
        fields: MovieFields {
            description: row.description,
            year: row.year,
            runtime: row.runtime,
            rating: row.rating,
            votes: row.votes,
            revenue: row.revenue,
        },
        ..Default::default()
    }
}

fn apply_fields(active: &mut movie::ActiveModel, fields: &FieldEdits) {
    if let Some(description) = &fields.description {
        active.description = Set(description.clone());
    }
    if let Some(year) = fields.year {
        active.year = Set(year);
    }
    if let Some(runtime) = fields.runtime {
        active.runtime = Set(runtime);
    }
    if let Some(rating) = fields.rating {
        active.rating = Set(rating);
    }
    if let Some(votes) = fields.votes {
        active.votes = Set(votes);
    }
    if let Some(revenue) = fields.revenue {
        active.revenue = Set(revenue);
    }
}

async fn apply_relation_change<C: ConnectionTrait>(
    conn: &C,
    movie_id: i32,
    change: &RelationChange,
) -> StoreResult<()> {
    let kind = change.kind;

    match &change.disconnect {
        Disconnect::Nothing => {},
        Disconnect::All => {
            let res = movie_edge::Entity::delete_many()
                .filter(movie_edge::Column::MovieId.eq(movie_id))
                .filter(movie_edge::Column::RelType.eq(kind.rel_type()))
                .exec(conn)
                .await?;
            debug!(movie_id, %kind, removed = res.rows_affected, "disconnected all");
        },
        Disconnect::Named(names) => {
            for name in names {
                if let Some(node) = find_node(conn, kind, &normalize_name(name)).await? {
                    movie_edge::Entity::delete_by_id((movie_id, node.id)).exec(conn).await?;
                }
            }
        },
    }

    for name in &change.connect {
        let name = checked_name(kind, name)?;
        let node = find_node(conn, kind, &name)
            .await?
            .ok_or_else(|| StoreError::MissingNode { kind, name: name.clone() })?;
        link(conn, movie_id, node.id, kind).await?;
    }

    for name in &change.create {
        let name = checked_name(kind, name)?;
        if find_node(conn, kind, &name).await?.is_some() {
            return Err(StoreError::DuplicateNode { kind, name });
        }
        let node = related_node::ActiveModel {
            id: Default::default(),
            label: Set(kind.label().to_string()),
            name: Set(name),
        }
        .insert(conn)
        .await?;
        link(conn, movie_id, node.id, kind).await?;
    }

    Ok(())
}

fn checked_name(kind: RelationKind, raw: &str) -> StoreResult<String> {
    let name = normalize_name(raw);
    if name.is_empty() {
        return Err(StoreError::EmptyName { kind });
    }
    Ok(name)
}

async fn link<C: ConnectionTrait>(
    conn: &C,
    movie_id: i32,
    node_id: i32,
    kind: RelationKind,
) -> StoreResult<()> {
    if movie_edge::Entity::find_by_id((movie_id, node_id)).one(conn).await?.is_some() {
        return Ok(());
    }

    let edge = movie_edge::ActiveModel {
        movie_id: Set(movie_id),
        node_id: Set(node_id),
        rel_type: Set(kind.rel_type().to_string()),
    };
    movie_edge::Entity::insert(edge).exec(conn).await?;
    Ok(())
}
