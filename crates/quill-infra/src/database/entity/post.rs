//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::{NewPost, PostChanges};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub subtitle: String,
    pub date: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub img_url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for quill_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            title: model.title,
            subtitle: model.subtitle,
            date: model.date,
            body: model.body,
            img_url: model.img_url,
        }
    }
}

impl From<NewPost> for ActiveModel {
    fn from(post: NewPost) -> Self {
        Self {
            author_id: Set(post.author_id),
            title: Set(post.fields.title),
            subtitle: Set(post.fields.subtitle),
            date: Set(post.date),
            body: Set(post.fields.body),
            img_url: Set(post.fields.img_url),
            ..Default::default()
        }
    }
}

impl ActiveModel {
    /// Marks every editable column as changed; `date` stays untouched.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(author_id) = changes.author_id {
            self.author_id = Set(author_id);
        }
        self.title = Set(changes.fields.title);
        self.subtitle = Set(changes.fields.subtitle);
        self.body = Set(changes.fields.body);
        self.img_url = Set(changes.fields.img_url);
    }
}
