use serde::{Deserialize, Serialize};

use super::{PostId, UserId};

pub type CommentId = i32;

/// Comment entity - text left by a signed-in user under a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    pub author_id: UserId,
    pub post_id: PostId,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub text: String,
    pub author_id: UserId,
    pub post_id: PostId,
}
