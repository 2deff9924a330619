use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movie")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub runtime: Option<i32>,
    pub rating: Option<f64>,
    pub votes: Option<i32>,
    pub revenue: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_edge::Entity")]
    MovieEdge,
}

impl Related<super::movie_edge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieEdge.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
