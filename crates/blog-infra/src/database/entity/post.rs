//! Post entity for SeaORM.

use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub created_at: DateTimeWithTimeZone,
    pub theme_id: Option<i64>,
    pub user_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::theme::Entity",
        from = "Column::ThemeId",
        to = "super::theme::Column::Id"
    )]
    Theme,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::theme::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Theme.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for blog_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            title: model.title,
            body: model.body,
            created_at: model.created_at.into(),
            theme_id: model.theme_id,
            user_id: model.user_id,
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<blog_core::domain::Post> for ActiveModel {
    fn from(post: blog_core::domain::Post) -> Self {
        Self {
            id: post.id.map_or(NotSet, Set),
            title: Set(post.title),
            body: Set(post.body),
            created_at: Set(post.created_at.into()),
            theme_id: Set(post.theme_id),
            user_id: Set(post.user_id),
        }
    }
}
