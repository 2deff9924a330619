use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum RelationKind {
    Actor,
    Director,
    Genre,
}

impl RelationKind {
    /// Order in which a save looks up and reconciles relations.
    pub const ALL: [RelationKind; 3] =
        [RelationKind::Actor, RelationKind::Genre, RelationKind::Director];

    pub fn label(self) -> &'static str {
        match self {
            RelationKind::Actor => "Actor",
            RelationKind::Director => "Director",
            RelationKind::Genre => "Genre",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Actor" => Some(RelationKind::Actor),
            "Director" => Some(RelationKind::Director),
            "Genre" => Some(RelationKind::Genre),
            _ => None,
        }
    }

    pub fn rel_type(self) -> &'static str {
        match self {
            RelationKind::Actor => "ACTED_IN",
            RelationKind::Director => "DIRECTED",
            RelationKind::Genre => "IN",
        }
    }

    pub fn movie_field(self) -> &'static str {
        match self {
            RelationKind::Actor => "actorsIn",
            RelationKind::Director => "directedBy",
            RelationKind::Genre => "genres",
        }
    }

    pub fn key_field(self) -> &'static str {
        match self {
            RelationKind::Actor | RelationKind::Director => "name",
            RelationKind::Genre => "genre",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RelationKind::Actor => "actor",
            RelationKind::Director => "director",
            RelationKind::Genre => "genre",
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieFields {
    pub description: Option<String>,
    pub year: Option<i32>,
    pub runtime: Option<i32>,
    pub rating: Option<f64>,
    pub votes: Option<i32>,
    pub revenue: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MovieRecord {
    pub title: String,
    pub fields: MovieFields,
    pub actors: Vec<String>,
    pub directors: Vec<String>,
    pub genres: Vec<String>,
}

impl MovieRecord {
    pub fn names(&self, kind: RelationKind) -> &[String] {
        match kind {
            RelationKind::Actor => &self.actors,
            RelationKind::Director => &self.directors,
            RelationKind::Genre => &self.genres,
        }
    }

    pub fn names_mut(&mut self, kind: RelationKind) -> &mut Vec<String> {
        match kind {
            RelationKind::Actor => &mut self.actors,
            RelationKind::Director => &mut self.directors,
            RelationKind::Genre => &mut self.genres,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MovieFilter {
    pub title: Option<String>,
}

impl MovieFilter {
    pub fn title(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()) }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Disconnect {
    #[default]
    Nothing,
    All,
    Named(Vec<String>),
}

/// One nested relationship change, applied as disconnect, then connect, then create.
#[derive(Clone, Debug, PartialEq)]
pub struct RelationChange {
    pub kind: RelationKind,
    pub disconnect: Disconnect,
    pub connect: Vec<String>,
    pub create: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub fields: MovieFields,
    pub relations: Vec<RelationChange>,
}

/// Scalar edits for an update: `None` keeps the column, `Some(None)` clears it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldEdits {
    pub description: Option<Option<String>>,
    pub year: Option<Option<i32>>,
    pub runtime: Option<Option<i32>>,
    pub rating: Option<Option<f64>>,
    pub votes: Option<Option<i32>>,
    pub revenue: Option<Option<f64>>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MovieChanges {
    pub fields: FieldEdits,
    pub relations: Vec<RelationChange>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct DeleteSummary {
    pub nodes_deleted: u64,
    pub relationships_deleted: u64,
}

#[derive(Clone, Debug)]
pub struct SearchResult {
    pub title: String,
    pub movie: Option<MovieRecord>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub title: String,
}
