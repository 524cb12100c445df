//! HTTP handlers and route configuration.

mod auth;
mod health;
mod pages;
mod posts;

use actix_web::web;

use crate::middleware::auth::RequireAdmin;
use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Malformed or incomplete bodies are validation failures
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    );

    cfg
        // Public pages
        .route("/", web::get().to(posts::home))
        .route("/about", web::get().to(pages::about))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::resource("/contact")
                .route(web::get().to(pages::contact_form))
                .route(web::post().to(pages::contact)),
        )
        .service(
            web::resource("/post/{id}")
                .route(web::get().to(posts::show))
                .route(web::post().to(posts::comment)),
        )
        // Account routes
        .service(
            web::resource("/register")
                .route(web::get().to(auth::register_form))
                .route(web::post().to(auth::register)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(auth::login_form))
                .route(web::post().to(auth::login)),
        )
        .route("/logout", web::get().to(auth::logout))
        // Admin routes
        .service(
            web::resource("/new-post")
                .wrap(RequireAdmin)
                .route(web::get().to(posts::new_post_form))
                .route(web::post().to(posts::create)),
        )
        .service(
            web::resource("/edit-post/{id}")
                .wrap(RequireAdmin)
                .route(web::get().to(posts::edit_form))
                .route(web::post().to(posts::update)),
        )
        .service(
            web::resource("/delete/{id}")
                .wrap(RequireAdmin)
                .route(web::get().to(posts::delete)),
        );
}
