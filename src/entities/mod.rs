pub mod movie;
pub mod movie_edge;
pub mod related_node;
