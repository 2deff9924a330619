use async_graphql::{InputObject, MaybeUndefined};

use crate::models::{
    Disconnect, FieldEdits, MovieChanges, MovieFields, MovieFilter, NewMovie, RelationChange,
    RelationKind,
};

macro_rules! relation_inputs {
    (
        kind: $kind:expr,
        key: $key:ident,
        where_input: $where_ty:ident,
        create_input: $create_ty:ident,
        connect_where: $connect_where:ident,
        connect_field: $connect_field:ident,
        disconnect_field: $disconnect_field:ident,
        create_field: $create_field:ident,
        field: $field:ident,
        update_field: $update_field:ident $(,)?
    ) => {
        #[derive(Clone, Debug, Default, InputObject)]
        pub struct $where_ty {
            pub $key: Option<String>,
        }

        #[derive(Clone, Debug, InputObject)]
        pub struct $create_ty {
            pub $key: String,
        }

        #[derive(Clone, Debug, InputObject)]
        pub struct $connect_where {
            pub node: $where_ty,
        }

        #[derive(Clone, Debug, InputObject)]
        pub struct $connect_field {
            #[graphql(name = "where")]
            pub where_: $connect_where,
        }

        /// Without `where`, every edge of this relationship is removed.
        #[derive(Clone, Debug, Default, InputObject)]
        pub struct $disconnect_field {
            #[graphql(name = "where")]
            pub where_: Option<$connect_where>,
        }

        #[derive(Clone, Debug, InputObject)]
        pub struct $create_field {
            pub node: $create_ty,
        }

        #[derive(Clone, Debug, Default, InputObject)]
        pub struct $field {
            pub connect: Option<Vec<$connect_field>>,
            pub create: Option<Vec<$create_field>>,
        }

        #[derive(Clone, Debug, Default, InputObject)]
        pub struct $update_field {
            pub connect: Option<Vec<$connect_field>>,
            pub create: Option<Vec<$create_field>>,
            pub disconnect: Option<Vec<$disconnect_field>>,
        }

        impl $field {
            pub fn into_change(self) -> RelationChange {
                RelationChange {
                    kind: $kind,
                    disconnect: Disconnect::Nothing,
                    connect: self
                        .connect
                        .unwrap_or_default()
                        .into_iter()
                        .map(|c| c.where_.node.$key.unwrap_or_default())
                        .collect(),
                    create: self
                        .create
                        .unwrap_or_default()
                        .into_iter()
                        .map(|c| c.node.$key)
                        .collect(),
                }
            }
        }

        impl $update_field {
            pub fn into_change(self) -> RelationChange {
                let disconnect = match self.disconnect {
                    None => Disconnect::Nothing,
                    Some(entries) => {
                        let named: Option<Vec<String>> = entries
                            .into_iter()
                            .map(|d| d.where_.and_then(|w| w.node.$key))
                            .collect();
                        match named {
                            Some(names) if !names.is_empty() => Disconnect::Named(names),
                            Some(_) => Disconnect::Nothing,
                            None => Disconnect::All,
                        }
                    },
                };

                let mut change = $field { connect: self.connect, create: self.create }.into_change();
                change.disconnect = disconnect;
                change
            }
        }
    };
}

relation_inputs! {
    kind: RelationKind::Actor,
    key: name,
    where_input: ActorWhere,
    create_input: ActorCreateInput,
    connect_where: ActorConnectWhere,
    connect_field: MovieActorsInConnectFieldInput,
    disconnect_field: MovieActorsInDisconnectFieldInput,
    create_field: MovieActorsInCreateFieldInput,
    field: MovieActorsInFieldInput,
    update_field: MovieActorsInUpdateFieldInput,
}

relation_inputs! {
    kind: RelationKind::Director,
    key: name,
    where_input: DirectorWhere,
    create_input: DirectorCreateInput,
    connect_where: DirectorConnectWhere,
    connect_field: MovieDirectedByConnectFieldInput,
    disconnect_field: MovieDirectedByDisconnectFieldInput,
    create_field: MovieDirectedByCreateFieldInput,
    field: MovieDirectedByFieldInput,
    update_field: MovieDirectedByUpdateFieldInput,
}

relation_inputs! {
    kind: RelationKind::Genre,
    key: genre,
    where_input: GenreWhere,
    create_input: GenreCreateInput,
    connect_where: GenreConnectWhere,
    connect_field: MovieGenresConnectFieldInput,
    disconnect_field: MovieGenresDisconnectFieldInput,
    create_field: MovieGenresCreateFieldInput,
    field: MovieGenresFieldInput,
    update_field: MovieGenresUpdateFieldInput,
}

#[derive(Clone, Debug, Default, InputObject)]
pub struct MovieWhere {
    pub title: Option<String>,
}

impl From<MovieWhere> for MovieFilter {
    fn from(w: MovieWhere) -> Self {
        Self { title: w.title }
    }
}

#[derive(Clone, Debug, InputObject)]
pub struct MovieCreateInput {
    pub title: String,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub runtime: Option<i32>,
    pub rating: Option<f64>,
    pub votes: Option<i32>,
    pub revenue: Option<f64>,
    pub actors_in: Option<MovieActorsInFieldInput>,
    pub directed_by: Option<MovieDirectedByFieldInput>,
    pub genres: Option<MovieGenresFieldInput>,
}

impl MovieCreateInput {
    pub fn into_new_movie(self) -> NewMovie {
        let relations = [
            self.actors_in.map(MovieActorsInFieldInput::into_change),
            self.directed_by.map(MovieDirectedByFieldInput::into_change),
            self.genres.map(MovieGenresFieldInput::into_change),
        ]
        .into_iter()
        .flatten()
        .collect();

        NewMovie {
            title: self.title,
            fields: MovieFields {
                description: self.description,
                year: self.year,
                runtime: self.runtime,
                rating: self.rating,
                votes: self.votes,
                revenue: self.revenue,
            },
            relations,
        }
    }
}

#[derive(Clone, Default, InputObject)]
pub struct MovieUpdateInput {
    pub description: MaybeUndefined<String>,
    pub year: MaybeUndefined<i32>,
    pub runtime: MaybeUndefined<i32>,
    pub rating: MaybeUndefined<f64>,
    pub votes: MaybeUndefined<i32>,
    pub revenue: MaybeUndefined<f64>,
    pub actors_in: Option<Vec<MovieActorsInUpdateFieldInput>>,
    pub directed_by: Option<Vec<MovieDirectedByUpdateFieldInput>>,
    pub genres: Option<Vec<MovieGenresUpdateFieldInput>>,
}

impl MovieUpdateInput {
    /// An omitted scalar is left alone; an explicit `null` clears it.
    pub fn into_changes(self) -> MovieChanges {
        let mut relations: Vec<RelationChange> = Vec::new();
        relations.extend(
            self.actors_in.unwrap_or_default().into_iter().map(|f| f.into_change()),
        );
        relations.extend(
            self.directed_by.unwrap_or_default().into_iter().map(|f| f.into_change()),
        );
        relations.extend(self.genres.unwrap_or_default().into_iter().map(|f| f.into_change()));

        MovieChanges {
            fields: FieldEdits {
                description: edit(self.description),
                year: edit(self.year),
                runtime: edit(self.runtime),
                rating: edit(self.rating),
                votes: edit(self.votes),
                revenue: edit(self.revenue),
            },
            relations,
        }
    }
}

fn edit<T>(value: MaybeUndefined<T>) -> Option<Option<T>> {
    match value {
        MaybeUndefined::Undefined => None,
        MaybeUndefined::Null => Some(None),
        MaybeUndefined::Value(v) => Some(Some(v)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor_where(name: &str) -> ActorConnectWhere {
        ActorConnectWhere { node: ActorWhere { name: Some(name.to_string()) } }
    }

    #[test]
    fn create_input_collects_connect_and_create() {
        let input = MovieCreateInput {
            title: "Heat".to_string(),
            description: None,
            year: Some(1995),
            runtime: None,
            rating: None,
            votes: None,
            revenue: None,
            actors_in: Some(MovieActorsInFieldInput {
                connect: Some(vec![MovieActorsInConnectFieldInput { where_: actor_where("Al Pacino") }]),
                create: Some(vec![MovieActorsInCreateFieldInput {
                    node: ActorCreateInput { name: "Val Kilmer".to_string() },
                }]),
            }),
            directed_by: None,
            genres: Some(MovieGenresFieldInput {
                connect: None,
                create: Some(vec![MovieGenresCreateFieldInput {
                    node: GenreCreateInput { genre: "Crime".to_string() },
                }]),
            }),
        };

        let movie = input.into_new_movie();
        assert_eq!(movie.fields.year, Some(1995));
        assert_eq!(movie.relations.len(), 2);
        assert_eq!(movie.relations[0].kind, RelationKind::Actor);
        assert_eq!(movie.relations[0].connect, vec!["Al Pacino"]);
        assert_eq!(movie.relations[0].create, vec!["Val Kilmer"]);
        assert_eq!(movie.relations[1].kind, RelationKind::Genre);
        assert_eq!(movie.relations[1].create, vec!["Crime"]);
    }

    #[test]
    fn empty_disconnect_entry_means_all() {
        let field = MovieActorsInUpdateFieldInput {
            disconnect: Some(vec![MovieActorsInDisconnectFieldInput::default()]),
            ..Default::default()
        };
        assert_eq!(field.into_change().disconnect, Disconnect::All);
    }

    #[test]
    fn named_disconnect_entries() {
        let field = MovieActorsInUpdateFieldInput {
            disconnect: Some(vec![MovieActorsInDisconnectFieldInput {
                where_: Some(actor_where("Jean Reno")),
            }]),
            ..Default::default()
        };
        assert_eq!(
            field.into_change().disconnect,
            Disconnect::Named(vec!["Jean Reno".to_string()])
        );
    }

    #[test]
    fn update_input_keeps_entry_order() {
        let update = MovieUpdateInput {
            actors_in: Some(vec![
                MovieActorsInUpdateFieldInput {
                    disconnect: Some(vec![MovieActorsInDisconnectFieldInput::default()]),
                    ..Default::default()
                },
                MovieActorsInUpdateFieldInput {
                    connect: Some(vec![MovieActorsInConnectFieldInput { where_: actor_where("B") }]),
                    ..Default::default()
                },
            ]),
            ..Default::default()
        };

        let changes = update.into_changes();
        assert_eq!(changes.relations.len(), 2);
        assert_eq!(changes.relations[0].disconnect, Disconnect::All);
        assert!(changes.relations[0].connect.is_empty());
        assert_eq!(changes.relations[1].connect, vec!["B"]);
    }

    #[test]
    fn null_scalar_clears_and_missing_keeps() {
        let update = MovieUpdateInput {
            year: MaybeUndefined::Null,
            rating: MaybeUndefined::Value(7.5),
            ..Default::default()
        };
        let fields = update.into_changes().fields;
        assert_eq!(fields.year, Some(None));
        assert_eq!(fields.rating, Some(Some(7.5)));
        assert_eq!(fields.description, None);
    }
}
