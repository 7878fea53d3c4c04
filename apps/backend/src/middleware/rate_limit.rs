//! Token-bucket admission gates.
//!
//! `RateLimit::Global` draws from the single process-wide bucket and wraps the
//! whole app. `RateLimit::PerPrincipal` draws from the caller's own bucket and
//! must sit inside `Authenticate`, which provides the principal.

use std::future::{ready, Ready};

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::LocalBoxFuture;

use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::logging::security;
use crate::rate_limit::{Admission, LimitScope};
use crate::state::app_state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimit {
    Global,
    PerPrincipal,
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service,
            gate: *self,
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: S,
    gate: RateLimit,
}

/// What stopped a request before it reached the handler.
enum Refusal {
    Limited {
        scope: LimitScope,
        principal: Option<String>,
        retry_after: std::time::Duration,
    },
    Failed(AppError),
}

impl<S> RateLimitMiddleware<S> {
    fn admit(&self, req: &ServiceRequest) -> Result<(), Refusal> {
        let state = req
            .app_data::<web::Data<AppState>>()
            .ok_or_else(|| Refusal::Failed(AppError::internal("AppState not registered")))?;

        let (scope, principal, admission) = match self.gate {
            RateLimit::Global => (LimitScope::Global, None, state.rate_limits.global.check()),
            RateLimit::PerPrincipal => {
                let subject_id = req
                    .extensions()
                    .get::<CurrentUser>()
                    .map(|u| u.subject_id.clone())
                    .ok_or_else(|| Refusal::Failed(AppError::unauthorized_missing_bearer()))?;
                let admission = state.rate_limits.principals.limiter_for(&subject_id).check();
                (LimitScope::Principal, Some(subject_id), admission)
            }
        };

        match admission {
            Admission::Admitted { .. } => Ok(()),
            Admission::Rejected { retry_after } => Err(Refusal::Limited {
                scope,
                principal,
                retry_after,
            }),
        }
    }
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        match self.admit(&req) {
            Ok(()) => {
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_boxed_body()) })
            }
            Err(refusal) => Box::pin(async move {
                let err = match refusal {
                    Refusal::Limited {
                        scope,
                        principal,
                        retry_after,
                    } => {
                        security::rate_limit_hit(scope, principal.as_deref(), req.path());
                        AppError::rate_limited(scope, retry_after)
                    }
                    Refusal::Failed(err) => err,
                };
                Ok(req.error_response(err))
            }),
        }
    }
}
