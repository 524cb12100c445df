//! Post and comment handlers.

use actix_web::{HttpResponse, http::header, web};
use chrono::{Datelike, Local};

use quill_core::domain::{Comment, Post, PostFields, PostId, PostUpdate, User};
use quill_core::services::{PostSummary, PostThread, ThreadComment};
use quill_shared::ApiResponse;
use quill_shared::dto::{
    CommentRequest, CommentResponse, FormResponse, PostListResponse, PostPageResponse,
    PostRequest, PostResponse,
};

use crate::middleware::auth::CurrentIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

const POST_FORM_FIELDS: [&str; 4] = ["title", "subtitle", "img_url", "body"];

/// GET /
pub async fn home(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let summaries = state.content.list_summaries().await?;

    Ok(HttpResponse::Ok().json(PostListResponse {
        posts: summaries
            .into_iter()
            .map(|PostSummary { post, author }| post_response(post, author.map(|u| u.username)))
            .collect(),
        current_year: Local::now().year(),
    }))
}

/// GET /post/{id}
pub async fn show(state: web::Data<AppState>, path: web::Path<PostId>) -> AppResult<HttpResponse> {
    let thread = state.content.get_thread(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page_response(thread)))
}

/// POST /post/{id} - requires a logged-in user
pub async fn comment(
    state: web::Data<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    path: web::Path<PostId>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let comment = state
        .content
        .add_comment(&identity, post_id, &body.comment)
        .await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/post/{post_id}")))
        .json(comment_response(comment, identity.user().cloned())))
}

/// GET /new-post
pub async fn new_post_form() -> HttpResponse {
    HttpResponse::Ok().json(post_form("New Post", None))
}

/// POST /new-post
pub async fn create(
    state: web::Data<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .content
        .create_post(&identity, fields(body.into_inner()))
        .await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/post/{}", post.id)))
        .json(post_response(post, identity.user().map(|u| u.username.clone()))))
}

/// GET /edit-post/{id}
pub async fn edit_form(
    state: web::Data<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let post = state.content.post_form(&identity, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post_form("Edit Post", Some(post_response(post, None)))))
}

/// POST /edit-post/{id}
pub async fn update(
    state: web::Data<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    path: web::Path<PostId>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let update = PostUpdate {
        author_id: req.author_id,
        fields: fields(req),
    };
    let post = state
        .content
        .update_post(&identity, path.into_inner(), update)
        .await?;

    Ok(HttpResponse::Ok()
        .insert_header((header::LOCATION, format!("/post/{}", post.id)))
        .json(post_response(post, None)))
}

/// GET /delete/{id}
pub async fn delete(
    state: web::Data<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.content.delete_post(&identity, id).await?;

    Ok(HttpResponse::Ok()
        .insert_header((header::LOCATION, "/"))
        .json(ApiResponse::ok_with_message(id, "Post deleted")))
}

fn fields(req: PostRequest) -> PostFields {
    PostFields {
        title: req.title,
        subtitle: req.subtitle,
        body: req.body,
        img_url: req.img_url,
    }
}

fn post_form(heading: &str, values: Option<PostResponse>) -> FormResponse {
    FormResponse {
        heading: heading.to_string(),
        fields: POST_FORM_FIELDS.iter().map(|f| f.to_string()).collect(),
        values,
    }
}

fn post_response(post: Post, author_name: Option<String>) -> PostResponse {
    PostResponse {
        id: post.id,
        author_id: post.author_id,
        author_name,
        title: post.title,
        subtitle: post.subtitle,
        date: post.date,
        body: post.body,
        img_url: post.img_url,
    }
}

fn comment_response(comment: Comment, author: Option<User>) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        text: comment.text,
        author_id: comment.author_id,
        author_name: author.map(|u| u.username),
        post_id: comment.post_id,
    }
}

fn page_response(thread: PostThread) -> PostPageResponse {
    PostPageResponse {
        post: post_response(thread.post, thread.author.map(|u| u.username)),
        comments: thread
            .comments
            .into_iter()
            .map(|ThreadComment { comment, author }| comment_response(comment, author))
            .collect(),
    }
}
