//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub role: String,
}

/// Returned after registration or login; the token is also set as a cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

/// Create or edit form for a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub img_url: String,
    /// Edit form only: reassigns the post to another user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i32,
    pub author_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub body: String,
    pub img_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i32,
    pub text: String,
    pub author_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    pub post_id: i32,
}

/// The post page: a post followed by its comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPageResponse {
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

/// Home page: every post, plus the year shown in the footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub current_year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub msg_sent: bool,
}

/// Describes a form a client should render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormResponse {
    pub heading: String,
    pub fields: Vec<String>,
    /// Current values when the form edits something that exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<PostResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutResponse {
    pub title: String,
    pub text: String,
}
