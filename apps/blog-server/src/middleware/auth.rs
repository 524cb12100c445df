//! Session extraction and the admin gate.

use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
    web,
};
use futures::future::LocalBoxFuture;
use quill_core::domain::Identity;
use quill_shared::ErrorResponse;

use super::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// Token presented by the client: the session cookie, else a Bearer header.
pub fn session_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn resolve(req: &HttpRequest) -> Result<Identity, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal("AppState not found in app data".to_string()))?;

    let token = session_token(req);
    Ok(state.auth.current_identity(token.as_deref()).await?)
}

/// The caller behind the request; `Anonymous` when no live session is presented.
///
/// ```ignore
/// async fn handler(CurrentIdentity(identity): CurrentIdentity) -> impl Responder {
///     format!("anonymous: {}", identity.is_anonymous())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl FromRequest for CurrentIdentity {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Already resolved by RequireAdmin
        if let Some(identity) = req.extensions().get::<Identity>() {
            let identity = identity.clone();
            return Box::pin(async move { Ok(CurrentIdentity(identity)) });
        }

        let req = req.clone();
        Box::pin(async move { resolve(&req).await.map(CurrentIdentity) })
    }
}

/// Rejects every request whose session does not belong to an administrator.
pub struct RequireAdmin;

impl<S, B> Transform<S, ServiceRequest> for RequireAdmin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RequireAdminService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAdminService {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireAdminService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireAdminService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let identity = resolve(req.request()).await?;
            let admin = req
                .app_data::<web::Data<AppState>>()
                .is_some_and(|state| state.auth.is_admin(&identity));

            if !admin {
                tracing::warn!(
                    path = req.path(),
                    user_id = ?identity.user_id(),
                    "Admin route rejected"
                );
                let response = HttpResponse::Forbidden().json(ErrorResponse::forbidden());
                return Ok(req.into_response(response).map_into_right_body());
            }

            req.extensions_mut().insert(identity);
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
