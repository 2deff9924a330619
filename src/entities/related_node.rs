use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "related_node")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub label: String,
    pub name: String,
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
