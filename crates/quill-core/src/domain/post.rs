use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{UserId, require};
use crate::error::DomainError;

pub type PostId = i32;

/// Post entity - a blog article owned by its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub title: String,
    pub subtitle: String,
    /// Human-readable publish date, e.g. "October 17, 2026".
    pub date: String,
    pub body: String,
    pub img_url: String,
}

/// The editable fields of a post, all required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFields {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub img_url: String,
}

impl PostFields {
    pub fn validate(&self) -> Result<(), DomainError> {
        require("title", &self.title)?;
        require("subtitle", &self.subtitle)?;
        require("body", &self.body)?;
        require("img_url", &self.img_url)?;
        Ok(())
    }
}

/// Edit-form submission. `author_id`, when present, reassigns the post.
#[derive(Debug, Clone, Deserialize)]
pub struct PostUpdate {
    #[serde(flatten)]
    pub fields: PostFields,
    #[serde(default)]
    pub author_id: Option<UserId>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: UserId,
    pub date: String,
    pub fields: PostFields,
}

/// Full overwrite applied by an atomic update; `date` is never touched.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub author_id: Option<UserId>,
    pub fields: PostFields,
}

impl Post {
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(author_id) = changes.author_id {
            self.author_id = author_id;
        }
        self.title = changes.fields.title;
        self.subtitle = changes.fields.subtitle;
        self.body = changes.fields.body;
        self.img_url = changes.fields.img_url;
    }

    pub fn fields(&self) -> PostFields {
        PostFields {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            body: self.body.clone(),
            img_url: self.img_url.clone(),
        }
    }
}

/// Formats the publish date stamped on new posts.
pub fn publish_date(day: NaiveDate) -> String {
    day.format("%B %-d, %Y").to_string()
}
