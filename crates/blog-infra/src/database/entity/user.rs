//! User entity for SeaORM.

use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub username: String,
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

/// Conversion from SeaORM Model to Domain User.
impl From<Model> for blog_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            username: model.username,
        }
    }
}

/// Conversion from Domain User to SeaORM ActiveModel.
impl From<blog_core::domain::User> for ActiveModel {
    fn from(user: blog_core::domain::User) -> Self {
        Self {
            id: user.id.map_or(NotSet, Set),
            name: Set(user.name),
            username: Set(user.username),
        }
    }
}
