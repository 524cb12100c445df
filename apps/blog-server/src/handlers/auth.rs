//! Account handlers: registration, login and logout.

use actix_web::{
    HttpRequest, HttpResponse,
    cookie::{Cookie, SameSite, time::Duration},
    http::header,
    web,
};

use quill_core::domain::{Registration, User};
use quill_core::services::SignedIn;
use quill_shared::ApiResponse;
use quill_shared::dto::{AuthResponse, FormResponse, LoginRequest, RegisterRequest, UserResponse};

use crate::middleware::auth::{SESSION_COOKIE, session_token};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /register
pub async fn register_form() -> HttpResponse {
    HttpResponse::Ok().json(form("Register", &["email", "password", "username"]))
}

/// POST /register - creates the account and signs it in
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let signed_in = state
        .auth
        .register(Registration {
            email: req.email,
            username: req.username,
            password: req.password,
        })
        .await?;

    Ok(signed_in_response(&state, HttpResponse::Created(), signed_in))
}

/// GET /login
pub async fn login_form() -> HttpResponse {
    HttpResponse::Ok().json(form("Log In", &["email", "password"]))
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let signed_in = state.auth.login(&body.email, &body.password).await?;
    Ok(signed_in_response(&state, HttpResponse::Ok(), signed_in))
}

/// GET /logout - safe to call without a session
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    if let Some(token) = session_token(&req) {
        state.auth.logout(&token).await;
    }

    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .insert_header((header::LOCATION, "/"))
        .json(ApiResponse::ok_with_message((), "Logged out"))
}

fn signed_in_response(
    state: &AppState,
    mut builder: actix_web::HttpResponseBuilder,
    signed_in: SignedIn,
) -> HttpResponse {
    let seconds = state.auth.session_seconds();
    let cookie = Cookie::build(SESSION_COOKIE, signed_in.token.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.secure_cookies)
        .max_age(Duration::seconds(seconds))
        .finish();

    builder
        .cookie(cookie)
        .insert_header((header::LOCATION, "/"))
        .json(AuthResponse {
            access_token: signed_in.token,
            token_type: "Bearer".to_string(),
            expires_in: seconds.max(0) as u64,
            user: user_response(signed_in.user),
        })
}

fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        role: user.role.as_str().to_string(),
        email: user.email,
        username: user.username,
    }
}

fn form(heading: &str, fields: &[&str]) -> FormResponse {
    FormResponse {
        heading: heading.to_string(),
        fields: fields.iter().map(|f| f.to_string()).collect(),
        values: None,
    }
}
