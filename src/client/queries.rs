use crate::models::RelationKind;

#[derive(Clone, Copy, Debug)]
pub struct Operation {
    pub name: &'static str,
    pub document: &'static str,
}

impl Operation {
    pub fn is_mutation(&self) -> bool {
        self.document.trim_start().starts_with("mutation")
    }
}

pub const MOVIES: Operation = Operation {
    name: "Movies",
    document: r#"
query Movies {
  movies {
    title
    description
    year
    runtime
    rating
    votes
    revenue
    actorsIn { name }
    directedBy { name }
    genres { genre }
  }
}
"#,
};

pub const CHECK_MOVIE_BY_TITLE: Operation = Operation {
    name: "CheckMovieByTitle",
    document: r#"
query CheckMovieByTitle($title: String!) {
  movies(where: { title: $title }) {
    title
    description
    year
    runtime
    rating
    votes
    revenue
    actorsIn { name }
    directedBy { name }
    genres { genre }
  }
}
"#,
};

pub const CHECK_ACTOR_EXISTENCE: Operation = Operation {
    name: "CheckActorExistence",
    document: r#"
query CheckActorExistence($name: String!) {
  actors(where: { name: $name }) { name }
}
"#,
};

pub const CHECK_DIRECTOR_EXISTENCE: Operation = Operation {
    name: "CheckDirectorExistence",
    document: r#"
query CheckDirectorExistence($name: String!) {
  directors(where: { name: $name }) { name }
}
"#,
};

pub const CHECK_GENRE_EXISTENCE: Operation = Operation {
    name: "CheckGenreExistence",
    document: r#"
query CheckGenreExistence($genre: String!) {
  genres(where: { genre: $genre }) { genre }
}
"#,
};

pub const CREATE_MOVIE: Operation = Operation {
    name: "CreateMovie",
    document: r#"
mutation CreateMovie($input: [MovieCreateInput!]!) {
  createMovies(input: $input) {
    movies {
      title
      description
      year
      runtime
      rating
      votes
      revenue
      actorsIn { name }
      directedBy { name }
      genres { genre }
    }
  }
}
"#,
};

pub const UPDATE_MOVIE: Operation = Operation {
    name: "UpdateMovie",
    document: r#"
mutation UpdateMovie(
  $title: String!
  $description: String
  $year: Int
  $runtime: Int
  $rating: Float
  $votes: Int
  $revenue: Float
  $actorsIn: [MovieActorsInUpdateFieldInput!]
  $genres: [MovieGenresUpdateFieldInput!]
  $directedBy: [MovieDirectedByUpdateFieldInput!]
) {
  updateMovies(
    where: { title: $title }
    update: {
      description: $description
      year: $year
      runtime: $runtime
      rating: $rating
      votes: $votes
      revenue: $revenue
      actorsIn: $actorsIn
      genres: $genres
      directedBy: $directedBy
    }
  ) {
    movies {
      title
      description
      year
      runtime
      rating
      votes
      revenue
      actorsIn { name }
      directedBy { name }
      genres { genre }
    }
  }
}
"#,
};

pub const DELETE_MOVIE: Operation = Operation {
    name: "DeleteMovie",
    document: r#"
mutation DeleteMovie($title: String!) {
  deleteMovies(where: { title: $title }) {
    nodesDeleted
    relationshipsDeleted
  }
}
"#,
};

pub fn existence_check(kind: RelationKind) -> (Operation, &'static str, &'static str) {
    match kind {
        RelationKind::Actor => (CHECK_ACTOR_EXISTENCE, "name", "actors"),
        RelationKind::Director => (CHECK_DIRECTOR_EXISTENCE, "name", "directors"),
        RelationKind::Genre => (CHECK_GENRE_EXISTENCE, "genre", "genres"),
    }
}
