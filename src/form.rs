use jiff::Timestamp;
use thiserror::Error;

use crate::{
    models::{MovieFields, MovieRecord, RelationKind},
    names::{join_names, normalize_name},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FormField {
    Title,
    Description,
    Year,
    Runtime,
    Rating,
    Votes,
    Revenue,
    Actors,
    Genres,
    Director,
}

impl FormField {
    pub const ALL: [FormField; 10] = [
        FormField::Title,
        FormField::Description,
        FormField::Year,
        FormField::Runtime,
        FormField::Rating,
        FormField::Votes,
        FormField::Revenue,
        FormField::Actors,
        FormField::Genres,
        FormField::Director,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Description => "description",
            FormField::Year => "year",
            FormField::Runtime => "runtime",
            FormField::Rating => "rating",
            FormField::Votes => "votes",
            FormField::Revenue => "revenue",
            FormField::Actors => "actors",
            FormField::Genres => "genres",
            FormField::Director => "director",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MovieForm {
    pub title: String,
    pub description: String,
    pub year: String,
    pub runtime: String,
    pub rating: String,
    pub votes: String,
    pub revenue: String,
    pub actors: String,
    pub genres: String,
    pub director: String,
}

impl MovieForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Description => &self.description,
            FormField::Year => &self.year,
            FormField::Runtime => &self.runtime,
            FormField::Rating => &self.rating,
            FormField::Votes => &self.votes,
            FormField::Revenue => &self.revenue,
            FormField::Actors => &self.actors,
            FormField::Genres => &self.genres,
            FormField::Director => &self.director,
        }
    }

    fn with(&self, field: FormField, value: String) -> Self {
        let mut next = self.clone();
        let slot = match field {
            FormField::Title => &mut next.title,
            FormField::Description => &mut next.description,
            FormField::Year => &mut next.year,
            FormField::Runtime => &mut next.runtime,
            FormField::Rating => &mut next.rating,
            FormField::Votes => &mut next.votes,
            FormField::Revenue => &mut next.revenue,
            FormField::Actors => &mut next.actors,
            FormField::Genres => &mut next.genres,
            FormField::Director => &mut next.director,
        };
        *slot = value;
        next
    }

    pub fn from_movie(movie: &MovieRecord) -> Self {
        let fields = &movie.fields;
        Self {
            title: movie.title.clone(),
            description: fields.description.clone().unwrap_or_default(),
            year: display_opt(fields.year),
            runtime: display_opt(fields.runtime),
            rating: display_opt(fields.rating),
            votes: display_opt(fields.votes),
            revenue: display_opt(fields.revenue),
            actors: join_names(&movie.actors),
            genres: join_names(&movie.genres),
            director: join_names(&movie.directors),
        }
    }

    pub fn relation_text(&self, kind: RelationKind) -> &str {
        match kind {
            RelationKind::Actor => &self.actors,
            RelationKind::Director => &self.director,
            RelationKind::Genre => &self.genres,
        }
    }

    pub fn parse(&self) -> Result<MovieDraft, FormError> {
        let title = normalize_name(&self.title);
        if title.is_empty() {
            return Err(FormError::MissingTitle);
        }

        let description = Some(self.description.trim().to_string()).filter(|d| !d.is_empty());

        Ok(MovieDraft {
            title,
            fields: MovieFields {
                description,
                year: parse_int(FormField::Year, &self.year)?,
                runtime: parse_int(FormField::Runtime, &self.runtime)?,
                rating: parse_float(FormField::Rating, &self.rating)?,
                votes: parse_int(FormField::Votes, &self.votes)?,
                revenue: parse_float(FormField::Revenue, &self.revenue)?,
            },
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MovieDraft {
    pub title: String,
    pub fields: MovieFields,
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum FormError {
    #[error("title is required")]
    MissingTitle,
    #[error("{0} must be a whole number")]
    NotInteger(&'static str),
    #[error("{0} must be a number")]
    NotNumber(&'static str),
}

fn parse_int(field: FormField, raw: &str) -> Result<Option<i32>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| FormError::NotInteger(field.name()))
}

fn parse_float(field: FormField, raw: &str) -> Result<Option<f64>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(FormError::NotNumber(field.name())),
    }
}

fn display_opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub message: String,
    /// `None` keeps the notice until the next save or cancel.
    pub expires_at: Option<Timestamp>,
}

impl Notice {
    pub fn is_transient(&self) -> bool {
        self.expires_at.is_some()
    }

    pub fn remaining_ms(&self, now: Timestamp) -> Option<i64> {
        self.expires_at.map(|at| (at.as_millisecond() - now.as_millisecond()).max(0))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState {
    pub fields: MovieForm,
    pub editing: bool,
    pub notice: Option<Notice>,
}

#[derive(Clone, Debug)]
pub enum FormAction {
    Input { field: FormField, value: String },
    BeginEdit(MovieRecord),
    Cancel,
    Saved,
    /// A save refused before any mutation, shown until `expires_at`.
    Rejected { message: String, expires_at: Timestamp },
    Failed(String),
    Tick(Timestamp),
}

pub fn reduce(state: &FormState, action: FormAction) -> FormState {
    match action {
        FormAction::Input { field, value } => {
            FormState { fields: state.fields.with(field, value), ..state.clone() }
        },
        FormAction::BeginEdit(movie) => {
            FormState { fields: MovieForm::from_movie(&movie), editing: true, notice: None }
        },
        FormAction::Cancel | FormAction::Saved => FormState::default(),
        FormAction::Rejected { message, expires_at } => FormState {
            notice: Some(Notice { message, expires_at: Some(expires_at) }),
            ..state.clone()
        },
        FormAction::Failed(message) => {
            FormState { notice: Some(Notice { message, expires_at: None }), ..state.clone() }
        },
        FormAction::Tick(now) => {
            let expired = state
                .notice
                .as_ref()
                .and_then(|n| n.expires_at)
                .is_some_and(|at| at <= now);
            if expired { FormState { notice: None, ..state.clone() } } else { state.clone() }
        },
    }
}
