//! Bearer authentication for protected scopes.
//!
//! Validates the access token from the Authorization header and stores the
//! resulting `CurrentUser` in request extensions. Anything else ends the
//! request with a 401 Problem Details response.

use std::future::{ready, Ready};

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::LocalBoxFuture;

use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::logging::security;
use crate::state::app_state::AppState;

pub struct Authenticate;

impl<S, B> Transform<S, ServiceRequest> for Authenticate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticateMiddleware { service }))
    }
}

pub struct AuthenticateMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthenticateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let verdict = authenticate(&req);

        match verdict {
            Ok(user) => {
                req.extensions_mut().insert(user);
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_boxed_body()) })
            }
            // Rendered inside the future so the trace id scope is active.
            Err(err) => Box::pin(async move {
                security::auth_failed(err.code().as_str(), req.path());
                Ok(req.error_response(err))
            }),
        }
    }
}

fn authenticate(req: &ServiceRequest) -> Result<CurrentUser, AppError> {
    let token = bearer_token(req.headers().get(header::AUTHORIZATION))?;
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not registered"))?;

    let claims = state.validator.validate(token)?;
    Ok(CurrentUser::from(claims))
}

/// `Bearer <token>`; the scheme is case-insensitive.
fn bearer_token(value: Option<&HeaderValue>) -> Result<&str, AppError> {
    let raw = value
        .and_then(|v| v.to_str().ok())
        .ok_or_else(AppError::unauthorized_missing_bearer)?;

    let mut parts = raw.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AppError::unauthorized_missing_bearer()),
    }
}
