//! Static pages and the contact form.

use actix_web::{HttpResponse, web};

use quill_core::domain::ContactMessage;
use quill_shared::dto::{AboutResponse, ContactRequest, ContactResponse, FormResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /about
pub async fn about() -> HttpResponse {
    HttpResponse::Ok().json(AboutResponse {
        title: "About Me".to_string(),
        text: "A small blog: the administrator writes posts, registered readers comment on them."
            .to_string(),
    })
}

/// GET /contact
pub async fn contact_form() -> HttpResponse {
    HttpResponse::Ok().json(FormResponse {
        heading: "Contact Me".to_string(),
        fields: ["name", "email", "phone", "message"]
            .iter()
            .map(|f| f.to_string())
            .collect(),
        values: None,
    })
}

/// POST /contact
pub async fn contact(
    state: web::Data<AppState>,
    body: web::Json<ContactRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    state
        .contact
        .submit(ContactMessage {
            name: req.name,
            email: req.email,
            phone: req.phone,
            message: req.message,
        })
        .await?;

    Ok(HttpResponse::Ok().json(ContactResponse { msg_sent: true }))
}
