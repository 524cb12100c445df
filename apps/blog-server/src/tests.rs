use std::sync::Arc;

use actix_web::{
    App,
    http::{StatusCode, header},
    test, web,
};
use serde_json::{Value, json};

use quill_infra::{
    Argon2PasswordService, InMemorySessionStore, JwtConfig, JwtTokenService, LogNotifier,
    PasswordConfig,
};

use crate::handlers::configure_routes;
use crate::middleware::auth::SESSION_COOKIE;
use crate::state::{Adapters, AppState, Repositories};

fn test_state() -> AppState {
    let passwords = Argon2PasswordService::new(&PasswordConfig {
        iterations: 1,
        memory_kib: 1024,
        parallelism: 1,
        ..PasswordConfig::default()
    })
    .unwrap();
    let tokens = JwtTokenService::new(JwtConfig {
        secret: "test-secret".to_string(),
        expiration_hours: 1,
        issuer: "quill-test".to_string(),
    });

    AppState::assemble(
        Repositories::in_memory(),
        Adapters {
            passwords: Arc::new(passwords),
            tokens: Arc::new(tokens),
            sessions: Arc::new(InMemorySessionStore::new()),
            notifier: Arc::new(LogNotifier::new("owner@example.com")),
        },
        false,
    )
}

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(configure_routes),
        )
        .await
    };
}

/// Registers an account and yields its session token.
macro_rules! register {
    ($app:expr, $email:expr, $username:expr) => {{
        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(json!({"email": $email, "username": $username, "password": "pw"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        body["access_token"].as_str().unwrap().to_string()
    }};
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

fn post_body(title: &str) -> Value {
    json!({
        "title": title,
        "subtitle": "Sub",
        "body": "<p>x</p>",
        "img_url": "http://i/1.png"
    })
}

#[actix_web::test]
async fn test_admin_creates_and_author_is_rejected() {
    let app = app!();
    let admin = register!(app, "admin@example.com", "admin");
    let author = register!(app, "b@example.com", "bee");

    let req = test::TestRequest::post()
        .uri("/new-post")
        .insert_header(bearer(&author))
        .set_json(post_body("Nope"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get().uri("/").to_request();
    let home: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(home["posts"].as_array().unwrap().len(), 0);

    let req = test::TestRequest::post()
        .uri("/new-post")
        .insert_header(bearer(&admin))
        .set_json(post_body("Hello"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/post/1");

    let req = test::TestRequest::get().uri("/post/1").to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["post"]["title"], "Hello");
    assert_eq!(page["post"]["author_name"], "admin");

    let req = test::TestRequest::get().uri("/").to_request();
    let home: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(home["posts"][0]["author_name"], "admin");
}

#[actix_web::test]
async fn test_anonymous_cannot_open_admin_forms() {
    let app = app!();

    for uri in ["/new-post", "/edit-post/1", "/delete/1"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{uri}");
    }
}

#[actix_web::test]
async fn test_comments_require_login() {
    let app = app!();
    let admin = register!(app, "admin@example.com", "admin");
    let author = register!(app, "b@example.com", "bee");

    let req = test::TestRequest::post()
        .uri("/new-post")
        .insert_header(bearer(&admin))
        .set_json(post_body("Hello"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/post/1")
        .set_json(json!({"comment": "hi"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");

    let req = test::TestRequest::post()
        .uri("/post/1")
        .insert_header(bearer(&author))
        .set_json(json!({"comment": "hi"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/post/1").to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["comments"][0]["text"], "hi");
    assert_eq!(page["comments"][0]["author_name"], "bee");
}

#[actix_web::test]
async fn test_delete_is_admin_only() {
    let app = app!();
    let admin = register!(app, "admin@example.com", "admin");
    let author = register!(app, "b@example.com", "bee");

    let req = test::TestRequest::post()
        .uri("/new-post")
        .insert_header(bearer(&admin))
        .set_json(post_body("Hello"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/delete/1")
        .insert_header(bearer(&author))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/delete/1")
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/post/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_edit_keeps_date_and_author() {
    let app = app!();
    let admin = register!(app, "admin@example.com", "admin");

    let req = test::TestRequest::post()
        .uri("/new-post")
        .insert_header(bearer(&admin))
        .set_json(post_body("Hello"))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/edit-post/1")
        .insert_header(bearer(&admin))
        .set_json(post_body("Renamed"))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(updated["title"], "Renamed");
    assert_eq!(updated["date"], created["date"]);
    assert_eq!(updated["author_id"], created["author_id"]);

    let req = test::TestRequest::get()
        .uri("/edit-post/1")
        .insert_header(bearer(&admin))
        .to_request();
    let form: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(form["values"]["title"], "Renamed");
}

#[actix_web::test]
async fn test_session_cookie_and_logout() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({"email": "admin@example.com", "username": "admin", "password": "pw"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .unwrap()
        .into_owned();
    assert_eq!(cookie.http_only(), Some(true));

    let req = test::TestRequest::get()
        .uri("/new-post")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/logout")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The old token no longer names a live session
    let req = test::TestRequest::get()
        .uri("/new-post")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_login_failures() {
    let app = app!();
    register!(app, "admin@example.com", "admin");

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({"email": "admin@example.com", "username": "again", "password": "pw"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"email": "nobody@example.com", "password": "pw"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["detail"], "User does not exist");

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"email": "admin@example.com", "password": "wrong"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["detail"], "Invalid password");
    assert_eq!(body["redirect"], "/login");

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"email": "admin@example.com", "password": "pw"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_incomplete_body_is_a_validation_failure() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({"email": "admin@example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::post()
        .uri("/contact")
        .set_json(json!({"name": "", "email": "a@b.c", "phone": "1", "message": "hi"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_public_pages() {
    let app = app!();

    for uri in ["/", "/about", "/contact", "/register", "/login", "/health"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
    }

    let req = test::TestRequest::post()
        .uri("/contact")
        .set_json(json!({"name": "Ann", "email": "a@b.c", "phone": "1", "message": "hi"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["msg_sent"], true);

    let req = test::TestRequest::get().uri("/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
