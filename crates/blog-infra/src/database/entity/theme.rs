//! Theme entity for SeaORM.

use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "themes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for blog_core::domain::Theme {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            description: model.description,
        }
    }
}

impl From<blog_core::domain::Theme> for ActiveModel {
    fn from(theme: blog_core::domain::Theme) -> Self {
        Self {
            id: theme.id.map_or(NotSet, Set),
            description: Set(theme.description),
        }
    }
}
